use crate::analysis::summary::MatchRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Radiant,
    Dire,
}

impl From<u8> for Side {
    fn from(value: u8) -> Self {
        if value & 0x80u8 != 0 {
            Self::Dire
        } else {
            Self::Radiant
        }
    }
}

// OpenDota /players/{account_id}/matches entry
#[derive(Debug, Deserialize, Clone)]
pub struct PlayerMatchDto {
    pub match_id: u64,
    pub player_slot: u8,
    // null for matches that never finished
    pub radiant_win: Option<bool>,
    pub start_time: i64,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub hero_id: u32,
    #[serde(default)]
    pub duration: u32,
}

impl PlayerMatchDto {
    pub fn won(&self) -> Option<bool> {
        let radiant_win = self.radiant_win?;
        Some((Side::from(self.player_slot) == Side::Radiant) == radiant_win)
    }

    /// `None` when the result or start time is unusable.
    pub fn into_record(self) -> Option<MatchRecord> {
        let won = self.won()?;
        let start_time = DateTime::<Utc>::from_timestamp(self.start_time, 0)?;
        Some(MatchRecord {
            match_id: self.match_id,
            start_time,
            won,
            kills: self.kills,
            deaths: self.deaths,
            assists: self.assists,
            hero_id: self.hero_id,
            duration_secs: self.duration,
        })
    }
}
