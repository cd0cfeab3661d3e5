use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid Steam64 ID '{0}': {1}")]
    InvalidSteamId(String, String),

    #[error("Rate limited by the stats API, please try again later")]
    RateLimited,

    #[error("HTTP status {0} from the stats API")]
    HttpStatus(u16),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(String),
}
