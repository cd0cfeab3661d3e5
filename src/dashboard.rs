use crate::analysis::ranking::{Highlights, Ranking};
use crate::analysis::summary::{summarize, MatchRecord, Summary, Window};
use crate::api::client::OpenDotaClient;
use crate::error::AppError;
use crate::players::Player;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use log::warn;
use serde::Serialize;

pub trait MatchSource {
    fn recent_matches(&self, account_id: u32, days: u32, limit: usize) -> Result<Vec<MatchRecord>, AppError>;
}

impl MatchSource for OpenDotaClient {
    fn recent_matches(&self, account_id: u32, days: u32, limit: usize) -> Result<Vec<MatchRecord>, AppError> {
        self.get_player_matches(account_id, days, limit)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub window: Window,
    pub title: String,
    pub cutoff: DateTime<Utc>,
    pub rows: Vec<Summary>,
    pub highlights: Highlights,
}

impl PeriodReport {
    pub fn total_games(&self) -> usize {
        self.rows.iter().map(|s| s.games).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub periods: Vec<PeriodReport>,
    pub players: usize,
    pub fetched_players: usize,
    pub warnings: Vec<String>,
}

pub fn build<S: MatchSource>(
    players: &[Player],
    source: &S,
    limit: usize,
    now: DateTime<Utc>,
    progress: &ProgressBar,
) -> Dashboard {
    // The widest window covers the others, so one request per player is enough
    let widest = Window::ALL
        .iter()
        .copied()
        .max_by_key(|w| w.days())
        .unwrap_or(Window::Month);

    let mut warnings = Vec::new();
    let mut fetched_players = 0;
    let mut fetched: Vec<(&Player, Vec<MatchRecord>)> = Vec::with_capacity(players.len());

    for player in players {
        progress.set_message(player.label.clone());
        let matches = match source.recent_matches(player.account_id, widest.days(), limit) {
            Ok(matches) => {
                fetched_players += 1;
                matches
            }
            Err(e) => {
                warn!("fetch failed for {} ({}): {}", player.label, player.steam_id, e);
                warnings.push(format!("Could not fetch matches for {}: {}", player.label, e));
                Vec::new()
            }
        };
        fetched.push((player, matches));
        progress.inc(1);
    }

    let periods = Window::ALL
        .iter()
        .map(|&window| {
            let cutoff = window.cutoff(now);
            let summaries = fetched
                .iter()
                .map(|(player, matches)| summarize(player, matches, cutoff))
                .collect();
            let rows = Ranking::rank(summaries);
            let highlights = Ranking::highlights(&rows);
            PeriodReport {
                window,
                title: window.title(),
                cutoff,
                rows,
                highlights,
            }
        })
        .collect();

    Dashboard {
        generated_at: now,
        periods,
        players: players.len(),
        fetched_players,
        warnings,
    }
}
