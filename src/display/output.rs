use crate::analysis::summary::{Outcome, Summary};
use crate::dashboard::{Dashboard, PeriodReport};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled, Debug, PartialEq)]
pub struct SummaryRow {
    #[tabled(rename = "#")]
    rank: String,
    player: String,
    games: String,
    #[tabled(rename = "W")]
    wins: String,
    #[tabled(rename = "L")]
    losses: String,
    win_rate: String,
    #[tabled(rename = "K / D / A")]
    kda: String,
    #[tabled(rename = "KDA")]
    kda_ratio: String,
    streak: String,
    best_streak: String,
}

pub fn summary_rows(rows: &[Summary]) -> Vec<SummaryRow> {
    rows.iter()
        .enumerate()
        .map(|(idx, s)| SummaryRow {
            rank: format!("#{}", idx + 1),
            player: s.label.clone(),
            games: s.games.to_string(),
            wins: s.wins.to_string(),
            losses: s.losses.to_string(),
            win_rate: format_rate(s.win_rate),
            kda: format!("{:.1} / {:.1} / {:.1}", s.avg_kills, s.avg_deaths, s.avg_assists),
            kda_ratio: format!("{:.2}", s.kda_ratio()),
            streak: format_streak(s),
            best_streak: s.best_win_streak.to_string(),
        })
        .collect()
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

pub fn format_streak(summary: &Summary) -> String {
    match summary.streak {
        Some(streak) => match streak.outcome {
            Outcome::Win => format!("W{}", streak.length),
            Outcome::Loss => format!("L{}", streak.length),
        },
        None => "-".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    EmptyState,
    Tables,
}

pub fn choose_view(dashboard: &Dashboard) -> View {
    if dashboard.players == 0 {
        View::EmptyState
    } else {
        View::Tables
    }
}

pub fn fetch_summary(dashboard: &Dashboard) -> String {
    if dashboard.fetched_players == dashboard.players {
        format!("Fetched match history for {} players", dashboard.players)
    } else {
        format!(
            "Fetched match history for {} of {} players",
            dashboard.fetched_players, dashboard.players
        )
    }
}

/// Prints warnings, then either the empty state or the period tables.
pub fn render_dashboard(dashboard: &Dashboard) -> View {
    for warning in &dashboard.warnings {
        display_warning(warning);
    }

    let view = choose_view(dashboard);
    match view {
        View::EmptyState => display_empty_state(),
        View::Tables => {
            if dashboard.fetched_players > 0 {
                display_success(&fetch_summary(dashboard));
            } else {
                display_info("No match history could be fetched");
            }
            display_dashboard(dashboard);
        }
    }
    view
}

pub fn display_dashboard(dashboard: &Dashboard) {
    for report in &dashboard.periods {
        display_period(report);
    }
    println!(
        "{}",
        format!(
            "Generated {}",
            dashboard.generated_at.format("%Y-%m-%d %H:%M UTC")
        )
        .dimmed()
    );
}

pub fn display_period(report: &PeriodReport) {
    println!("\n{}", format!("📅 {}", report.title.to_uppercase()).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    if report.total_games() == 0 {
        println!(
            "{}\n",
            format!("No matches found for the {}.", report.title.to_lowercase()).yellow()
        );
        return;
    }

    let mut table = Table::new(summary_rows(&report.rows));
    table.with(Style::rounded());
    println!("{}\n", table);

    if let Some(winner) = &report.highlights.top_winner {
        println!(
            "{} {} with {} over {} games ({})",
            "🏆 Top winner:".bold().green(),
            winner.label.bold(),
            format_rate(winner.win_rate).green(),
            winner.games,
            format_streak(winner)
        );
    }
    if let Some(loser) = &report.highlights.top_loser {
        println!(
            "{} {} with {} over {} games ({})",
            "💀 Top loser:".bold().red(),
            loser.label.bold(),
            format_rate(loser.win_rate).red(),
            loser.games,
            format_streak(loser)
        );
    }
    println!();
}

pub fn display_empty_state() {
    println!("\n{}", "No players to show".bold().yellow());
    println!("Pass Steam64 IDs (one per line or comma-separated), e.g.:");
    println!("  dota_friends 76561198355928347 Friend=76561198220727716");
    println!("or list them in a players file (--file, or DOTA_PLAYERS_FILE).\n");
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
