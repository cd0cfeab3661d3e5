use crate::error::AppError;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Offset between a Steam64 id and the 32-bit account id used by the stats API.
pub const STEAM_EPOCH: u64 = 76561197960265728;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub steam_id: u64,
    pub account_id: u32,
    pub label: String,
}

impl Player {
    pub fn new(steam_id: u64, label: Option<&str>) -> Result<Self, AppError> {
        let account_id = account_id_from_steam64(steam_id)?;
        let label = label
            .map(str::to_string)
            .unwrap_or_else(|| steam_id.to_string());
        Ok(Player {
            steam_id,
            account_id,
            label,
        })
    }
}

pub fn account_id_from_steam64(steam_id: u64) -> Result<u32, AppError> {
    let invalid = |reason: &str| AppError::InvalidSteamId(steam_id.to_string(), reason.to_string());

    let account_id = steam_id
        .checked_sub(STEAM_EPOCH)
        .ok_or_else(|| invalid("below the Steam64 range"))?;
    if account_id == 0 {
        return Err(invalid("account id would be zero"));
    }
    u32::try_from(account_id).map_err(|_| invalid("above the Steam64 range"))
}

pub fn parse_steam64(raw: &str) -> Result<u64, AppError> {
    let trimmed = raw.trim();
    trimmed
        .parse()
        .map_err(|_| AppError::InvalidSteamId(trimmed.to_string(), "not a number".to_string()))
}

// Entries are `steam64` or `label=steam64`, `#` starts a comment
pub fn parse_player_list(raw: &str) -> (Vec<Player>, Vec<String>) {
    let mut players = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    let entries = raw
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty());

    for entry in entries {
        match parse_entry(entry) {
            Ok(player) => {
                if seen.insert(player.steam_id) {
                    players.push(player);
                } else {
                    warnings.push(format!("Duplicate Steam64 ID skipped: {}", player.steam_id));
                }
            }
            Err(e) => warnings.push(e.to_string()),
        }
    }

    (players, warnings)
}

/// Reads a player list file. A missing file is only an error when `required`.
pub fn read_players_file(path: &Path, required: bool) -> Result<String, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!("read player list from {}", path.display());
            Ok(content)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => Ok(String::new()),
        Err(e) => Err(AppError::IoError(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

fn parse_entry(entry: &str) -> Result<Player, AppError> {
    let (label, id) = match entry.split_once('=') {
        Some((label, id)) => (Some(label.trim()).filter(|l| !l.is_empty()), id.trim()),
        None => (None, entry),
    };

    Player::new(parse_steam64(id)?, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_known_profile() {
        let steam_id = parse_steam64("76561198355928347").unwrap();
        assert_eq!(account_id_from_steam64(steam_id).unwrap(), 395662619);
    }

    #[test]
    fn conversion_is_plain_offset() {
        for account_id in [1u64, 42, 395662619, u32::MAX as u64] {
            let steam_id = STEAM_EPOCH + account_id;
            let converted = account_id_from_steam64(steam_id).unwrap();
            assert_eq!(converted as u64, steam_id - STEAM_EPOCH);
            assert!(converted > 0);
        }
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(matches!(
            parse_steam64("steamcommunity.com/id/friend"),
            Err(AppError::InvalidSteamId(_, _))
        ));
        assert!(parse_steam64("").is_err());
        assert!(parse_steam64("-5").is_err());
    }

    #[test]
    fn rejects_underflow_and_zero() {
        assert!(account_id_from_steam64(12345).is_err());
        assert!(account_id_from_steam64(STEAM_EPOCH).is_err());
    }

    #[test]
    fn rejects_ids_past_account_range() {
        assert!(account_id_from_steam64(STEAM_EPOCH + u32::MAX as u64 + 1).is_err());
    }

    #[test]
    fn parses_mixed_separators_labels_and_comments() {
        let raw = "76561198355928347  # You\nFriend=76561198220727716, 76561197960265729\n\n";
        let (players, warnings) = parse_player_list(raw);

        assert!(warnings.is_empty());
        assert_eq!(
            players,
            vec![
                Player {
                    steam_id: 76561198355928347,
                    account_id: 395662619,
                    label: "76561198355928347".to_string(),
                },
                Player {
                    steam_id: 76561198220727716,
                    account_id: 260461988,
                    label: "Friend".to_string(),
                },
                Player {
                    steam_id: 76561197960265729,
                    account_id: 1,
                    label: "76561197960265729".to_string(),
                },
            ]
        );
    }

    #[test]
    fn labelled_entry_keeps_the_parsed_id() {
        let (players, warnings) = parse_player_list(" Friend = 76561198220727716 ");
        assert!(warnings.is_empty());
        assert_eq!(
            players,
            vec![Player {
                steam_id: 76561198220727716,
                account_id: 260461988,
                label: "Friend".to_string(),
            }]
        );
    }

    #[test]
    fn invalid_and_duplicate_entries_become_warnings() {
        let raw = "abc, 76561198355928347, 100, Me=76561198355928347";
        let (players, warnings) = parse_player_list(raw);

        assert_eq!(players.len(), 1);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("abc"));
        assert!(warnings[1].contains("100"));
        assert!(warnings[2].contains("Duplicate"));
    }

    #[test]
    fn reads_players_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.txt");
        fs::write(&path, "Me=76561198355928347\n").unwrap();

        let content = read_players_file(&path, true).unwrap();
        let (players, _) = parse_player_list(&content);
        assert_eq!(players[0].label, "Me");
    }

    #[test]
    fn missing_players_file_is_only_fatal_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        assert_eq!(read_players_file(&path, false).unwrap(), "");
        assert!(matches!(
            read_players_file(&path, true),
            Err(AppError::IoError(_))
        ));
    }

    #[test]
    fn empty_input_gives_no_players() {
        let (players, warnings) = parse_player_list("  \n , ,\n# nobody yet");
        assert!(players.is_empty());
        assert!(warnings.is_empty());
    }
}
