use crate::players::Player;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn from_won(won: bool) -> Self {
        if won {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

/// One player's result in a single match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub match_id: u64,
    pub start_time: DateTime<Utc>,
    pub won: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub hero_id: u32,
    pub duration_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Week,
    Month,
}

impl Window {
    pub const ALL: [Window; 2] = [Window::Week, Window::Month];

    pub fn days(self) -> u32 {
        match self {
            Window::Week => 7,
            Window::Month => 30,
        }
    }

    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.days()))
    }

    pub fn title(self) -> String {
        format!("Last {} days", self.days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub outcome: Outcome,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub steam_id: u64,
    pub label: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    /// Fraction of games won, in `[0, 1]`.
    pub win_rate: f64,
    pub loss_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub hours_played: f64,
    pub most_played_hero: Option<u32>,
    pub streak: Option<Streak>,
    pub best_win_streak: usize,
}

impl Summary {
    pub fn kda_ratio(&self) -> f64 {
        (self.avg_kills + self.avg_assists) / self.avg_deaths.max(1.0)
    }
}

/// Records that started at or after `cutoff`.
pub fn within_window(records: &[MatchRecord], cutoff: DateTime<Utc>) -> Vec<&MatchRecord> {
    records.iter().filter(|r| r.start_time >= cutoff).collect()
}

pub fn summarize(player: &Player, records: &[MatchRecord], cutoff: DateTime<Utc>) -> Summary {
    let mut recent = within_window(records, cutoff);
    // Most recent first; match ids break ties between identical start times
    recent.sort_by(|a, b| {
        b.start_time
            .cmp(&a.start_time)
            .then(b.match_id.cmp(&a.match_id))
    });

    let games = recent.len();
    let wins = recent.iter().filter(|r| r.won).count();
    let losses = games - wins;

    let rate = |count: usize| {
        if games == 0 {
            0.0
        } else {
            count as f64 / games as f64
        }
    };
    let average = |stat: fn(&MatchRecord) -> u32| {
        if games == 0 {
            0.0
        } else {
            recent.iter().map(|&r| f64::from(stat(r))).sum::<f64>() / games as f64
        }
    };

    Summary {
        steam_id: player.steam_id,
        label: player.label.clone(),
        games,
        wins,
        losses,
        win_rate: rate(wins),
        loss_rate: rate(losses),
        avg_kills: average(|r| r.kills),
        avg_deaths: average(|r| r.deaths),
        avg_assists: average(|r| r.assists),
        hours_played: recent.iter().map(|r| f64::from(r.duration_secs)).sum::<f64>() / 3600.0,
        most_played_hero: most_played_hero(&recent),
        streak: current_streak(&recent),
        best_win_streak: best_win_streak(&recent),
    }
}

/// Trailing run of identical outcomes. Expects records newest first.
fn current_streak(newest_first: &[&MatchRecord]) -> Option<Streak> {
    let latest = newest_first.first()?.won;
    let length = newest_first
        .iter()
        .take_while(|r| r.won == latest)
        .count();
    Some(Streak {
        outcome: Outcome::from_won(latest),
        length,
    })
}

// Ties go to the lowest hero id
fn most_played_hero(records: &[&MatchRecord]) -> Option<u32> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.hero_id).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(hero_a, count_a), (hero_b, count_b)| count_a.cmp(count_b).then(hero_b.cmp(hero_a)))
        .map(|(hero, _)| hero)
}

/// Longest run of consecutive wins. Expects records newest first.
fn best_win_streak(newest_first: &[&MatchRecord]) -> usize {
    let mut best = 0;
    let mut current = 0;
    for record in newest_first.iter().rev() {
        if record.won {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}
