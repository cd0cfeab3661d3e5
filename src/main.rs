mod analysis;
mod api;
mod config;
mod dashboard;
mod display;
mod error;
mod players;

use api::client::OpenDotaClient;
use clap::Parser;
use config::Config;
use display::output::{display_error, display_info, render_dashboard};
use error::AppError;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "Dota Friends")]
#[command(about = "Recent Dota 2 win rates, K/D/A and streaks for a group of friends", long_about = None)]
struct Args {
    /// Steam64 IDs, optionally labelled as Name=ID (comma-separated also works)
    players: Vec<String>,

    /// Read players from a file (one per line or comma-separated)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// OpenDota or Steam Web API key (overrides DOTA_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Maximum number of matches fetched per player
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print the dashboard as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    if let Some(key) = args.api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key);
    }
    if let Some(limit) = args.limit {
        if limit == 0 {
            return Err(AppError::ConfigError("--limit must be at least 1".to_string()));
        }
        config.match_limit = limit;
    }

    let raw_players = if !args.players.is_empty() {
        args.players.join("\n")
    } else if let Some(path) = &args.file {
        players::read_players_file(path, true)?
    } else {
        players::read_players_file(&config.players_file, false)?
    };

    let (players, mut warnings) = players::parse_player_list(&raw_players);
    debug!("{} valid players, {} rejected entries", players.len(), warnings.len());

    let progress = if args.json || players.is_empty() {
        ProgressBar::hidden()
    } else {
        display_info(&format!(
            "Fetching up to {} matches for {} players{}",
            config.match_limit,
            players.len(),
            if config.api_key.is_some() { " (with API key)" } else { "" }
        ));
        let pb = ProgressBar::new(players.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb
    };

    let client = OpenDotaClient::new(&config);
    let mut report = dashboard::build(&players, &client, config.match_limit, chrono::Utc::now(), &progress);
    progress.finish_and_clear();

    warnings.append(&mut report.warnings);
    report.warnings = warnings;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::JsonError(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    render_dashboard(&report);

    Ok(())
}
