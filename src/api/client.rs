use crate::analysis::summary::MatchRecord;
use crate::config::Config;
use crate::error::AppError;
use governor::{Quota, RateLimiter, state::{InMemoryState, NotKeyed}, clock::{Clock, DefaultClock}};
use log::debug;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::PlayerMatchDto;

const USER_AGENT: &str = concat!("dota_friends/", env!("CARGO_PKG_VERSION"));
// OpenDota allows 60 calls/minute without a key
const REQUESTS_PER_MINUTE: u32 = 60;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub struct OpenDotaClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: DirectLimiter,
    clock: DefaultClock,
}

impl OpenDotaClient {
    pub fn new(config: &Config) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(REQUESTS_PER_MINUTE).unwrap_or(NonZeroU32::MIN));
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build();
        let clock = DefaultClock::default();
        OpenDotaClient {
            agent,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            rate_limiter: RateLimiter::direct_with_clock(quota, clock.clone()),
            clock,
        }
    }

    fn pace(&self) {
        wait_for_permit(&self.rate_limiter, &self.clock);
    }

    fn execute_request(&self, url: &str, params: &[(&str, String)]) -> Result<String, AppError> {
        self.pace();
        // The key is appended after logging so it never reaches the logs
        debug!("GET {} {:?}", url, params);

        let mut request = self.agent.get(url).set("User-Agent", USER_AGENT);
        for (name, value) in params {
            request = request.query(name, value);
        }
        if let Some(key) = &self.api_key {
            request = request.query("api_key", key);
        }

        match request.call() {
            Ok(resp) => resp.into_string().map_err(|e| AppError::HttpError(e.to_string())),
            Err(ureq::Error::Status(429, _)) => Err(AppError::RateLimited),
            Err(ureq::Error::Status(code, _)) => Err(AppError::HttpStatus(code)),
            // Transport errors embed the full URL, api_key included, so only keep the cause
            Err(ureq::Error::Transport(transport)) => Err(AppError::HttpError(
                match transport.message() {
                    Some(message) => format!("{}: {}", transport.kind(), message),
                    None => transport.kind().to_string(),
                },
            )),
        }
    }

    /// Matches played by `account_id` in the last `days` days, newest first as returned by the API.
    pub fn get_player_matches(
        &self,
        account_id: u32,
        days: u32,
        limit: usize,
    ) -> Result<Vec<MatchRecord>, AppError> {
        let url = endpoints::player_matches(&self.base_url, account_id);
        let params = [("date", days.to_string()), ("limit", limit.to_string())];

        let body = self.execute_request(&url, &params)?;
        let matches: Vec<PlayerMatchDto> = serde_json::from_str(&body).map_err(|e| {
            AppError::JsonError(e.to_string())
        })?;

        let fetched = matches.len();
        let records: Vec<MatchRecord> = matches
            .into_iter()
            .filter_map(PlayerMatchDto::into_record)
            .collect();
        if records.len() < fetched {
            debug!(
                "dropped {} unfinished matches for account {}",
                fetched - records.len(),
                account_id
            );
        }

        Ok(records)
    }
}

// Sleeps for exactly as long as the limiter asks
fn wait_for_permit(limiter: &DirectLimiter, clock: &DefaultClock) {
    while let Err(not_until) = limiter.check() {
        thread::sleep(not_until.wait_time_from(clock.now()));
    }
}
