use super::summary::Summary;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlights {
    pub top_winner: Option<Summary>,
    pub top_loser: Option<Summary>,
}

pub struct Ranking;

impl Ranking {
    /// Win rate descending, then games played descending, then label A-Z.
    pub fn compare(a: &Summary, b: &Summary) -> Ordering {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(Ordering::Equal)
            .then(b.games.cmp(&a.games))
            .then_with(|| a.label.cmp(&b.label))
    }

    pub fn rank(mut summaries: Vec<Summary>) -> Vec<Summary> {
        summaries.sort_by(Self::compare);
        summaries
    }

    /// Top and bottom of an already ranked list, ignoring players with no games.
    pub fn highlights(ranked: &[Summary]) -> Highlights {
        let mut played = ranked.iter().filter(|s| s.games > 0);
        let top_winner = played.next().cloned();
        let top_loser = played.last().cloned();
        Highlights {
            top_winner,
            top_loser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(label: &str, wins: usize, losses: usize) -> Summary {
        let games = wins + losses;
        let win_rate = if games == 0 {
            0.0
        } else {
            wins as f64 / games as f64
        };
        Summary {
            steam_id: 76561197960265729,
            label: label.to_string(),
            games,
            wins,
            losses,
            win_rate,
            loss_rate: if games == 0 { 0.0 } else { 1.0 - win_rate },
            avg_kills: 0.0,
            avg_deaths: 0.0,
            avg_assists: 0.0,
            hours_played: 0.0,
            most_played_hero: None,
            streak: None,
            best_win_streak: 0,
        }
    }

    fn labels(ranked: &[Summary]) -> Vec<&str> {
        ranked.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn sorts_by_win_rate_descending() {
        let ranked = Ranking::rank(vec![
            summary("low", 1, 3),
            summary("high", 3, 1),
            summary("mid", 2, 2),
        ]);
        assert_eq!(labels(&ranked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn ties_break_on_games_then_label() {
        let ranked = Ranking::rank(vec![
            summary("zed", 1, 1),
            summary("amy", 1, 1),
            summary("bob", 3, 3),
        ]);
        assert_eq!(labels(&ranked), vec!["bob", "amy", "zed"]);
    }

    #[test]
    fn highlights_mark_first_and_last_with_games() {
        let ranked = Ranking::rank(vec![
            summary("idle", 0, 0),
            summary("winner", 4, 1),
            summary("loser", 1, 4),
        ]);
        let highlights = Ranking::highlights(&ranked);
        assert_eq!(highlights.top_winner.map(|s| s.label), Some("winner".to_string()));
        assert_eq!(highlights.top_loser.map(|s| s.label), Some("loser".to_string()));
    }

    #[test]
    fn single_player_is_only_top_winner() {
        let ranked = Ranking::rank(vec![summary("solo", 1, 2)]);
        let highlights = Ranking::highlights(&ranked);
        assert_eq!(highlights.top_winner.map(|s| s.label), Some("solo".to_string()));
        assert_eq!(highlights.top_loser, None);
    }

    #[test]
    fn no_games_no_highlights() {
        let ranked = Ranking::rank(vec![summary("a", 0, 0), summary("b", 0, 0)]);
        assert_eq!(Ranking::highlights(&ranked), Highlights::default());
        assert_eq!(Ranking::highlights(&[]), Highlights::default());
    }
}
