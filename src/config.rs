use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.opendota.com/api";
pub const DEFAULT_MATCH_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub match_limit: usize,
    pub players_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty key in .env is the same as no key at all
        let api_key = lookup("DOTA_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let api_url = lookup("OPENDOTA_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let match_limit = match lookup("DOTA_MATCH_LIMIT") {
            Some(raw) => parse_limit(&raw)?,
            None => DEFAULT_MATCH_LIMIT,
        };

        let players_file = lookup("DOTA_PLAYERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_players_file);

        Ok(Config {
            api_key,
            api_url,
            match_limit,
            players_file,
        })
    }
}

fn parse_limit(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(AppError::ConfigError(format!(
            "DOTA_MATCH_LIMIT must be a positive integer, got '{}'",
            raw
        ))),
    }
}

fn default_players_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dota_friends")
        .join("players.txt")
}
