use aggregator::Aggregator;
use analytics::{AnalyticsEngine, LeagueReport};
use anyhow::Context;
use api_client::{FplApi, FplClient, SessionCache};
use chrono::Utc;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::Config;
use core_types::LeagueTables;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the gaffer league analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report => handle_report(config).await?,
        Commands::Serve { port } => handle_serve(config, port).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Comparative statistics for an FPL mini-league.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest league data and print the statistics report.
    Report,
    /// Run the dashboard JSON API server.
    Serve {
        /// Override the configured listen port.
        #[arg(long)]
        port: Option<u16>,
    },
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles the orchestration of the report command: fetch, aggregate,
/// calculate, print.
async fn handle_report(config: Config) -> anyhow::Result<()> {
    let api = SessionCache::new(FplClient::new(&config.api)?);

    // Set up the progress bar over the sequential fetches.
    let progress_bar = ProgressBar::new(config.league.entrants.len() as u64 + 1);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut histories = HashMap::new();
    for entrant in &config.league.entrants {
        progress_bar.set_message(format!("Fetching {}...", entrant.name));
        let records = api
            .entry_history(entrant.id)
            .await
            .with_context(|| format!("Failed to fetch history for {}", entrant.name))?;
        histories.insert(entrant.id, records);
        progress_bar.inc(1);
    }

    progress_bar.set_message("Fetching gameweek averages...");
    let summaries = api
        .gameweek_summaries()
        .await
        .context("Failed to fetch the gameweek summaries")?;
    progress_bar.inc(1);
    progress_bar.finish_with_message("All data fetched!");

    let aggregator = Aggregator::new(config.league.entrants.clone());
    let tables = aggregator.aggregate(&histories, &summaries)?;
    let report = AnalyticsEngine::new().calculate(&tables)?;

    print_report(&config.league.name, &tables, &report);

    Ok(())
}

/// Prints the derived statistics as terminal tables and highlight lines.
fn print_report(league: &str, tables: &LeagueTables, report: &LeagueReport) {
    println!();
    println!(
        "{} league report, generated {}",
        league,
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    println!();
    println!("🥃 The Whisky Race");
    let mut standings = Table::new();
    standings.load_preset(UTF8_FULL);
    standings.set_header(vec!["Rank", "Player", "Total Points"]);
    for standing in &report.standings {
        standings.add_row(vec![
            standing.rank.to_string(),
            standing.entrant.clone(),
            standing.total_points.to_string(),
        ]);
    }
    println!("{standings}");

    println!();
    println!("🏆 Big Winners");
    if let Some(best) = &report.best_week {
        println!(
            "The highest gameweek score is {} points, achieved by {} in Gameweek {}.",
            best.points, best.entrant, best.gameweek
        );
    }
    if let Some(best) = &report.best_percentile {
        println!(
            "The best gameweek rank was the top {} of players, achieved by {} in Gameweek {}.",
            format_percentile(best.percentile),
            best.entrant,
            best.gameweek
        );
    }
    if let Some(streak) = &report.longest_above_average_streak {
        println!(
            "The longest streak of beating the average is {} gameweeks, achieved by {}.",
            streak.length, streak.entrant
        );
    }

    println!();
    println!("💩 Big Losers");
    if let Some(worst) = &report.worst_week {
        println!(
            "The lowest gameweek score is {} points, achieved by {} in Gameweek {}.",
            worst.points, worst.entrant, worst.gameweek
        );
    }
    if let Some(worst) = &report.worst_percentile {
        println!(
            "The worst gameweek rank was the lowest {} of players, achieved by {} in Gameweek {}.",
            format_percentile(worst.percentile),
            worst.entrant,
            worst.gameweek
        );
    }
    if let Some(streak) = &report.longest_below_average_streak {
        println!(
            "The longest streak of not beating the average is {} gameweeks, achieved by {}.",
            streak.length, streak.entrant
        );
    }

    println!();
    println!("Total Transfers per Player");
    let mut transfers = Table::new();
    transfers.load_preset(UTF8_FULL);
    transfers.set_header(vec!["Player", "Total Transfers"]);
    for total in &report.transfer_totals {
        transfers.add_row(vec![total.entrant.clone(), total.transfers.to_string()]);
    }
    println!("{transfers}");

    println!();
    println!("Times Each Player Beats the Average");
    let mut counts = Table::new();
    counts.load_preset(UTF8_FULL);
    counts.set_header(vec!["Player", "Times Above Average"]);
    for count in &report.above_average_counts {
        counts.add_row(vec![count.entrant.clone(), count.gameweeks.to_string()]);
    }
    println!("{counts}");

    println!();
    println!("Weekly Scores (with Game Average)");
    let mut weekly = Table::new();
    weekly.load_preset(UTF8_FULL);
    let mut header = vec!["Gameweek".to_string()];
    header.extend(
        tables
            .weekly
            .columns()
            .iter()
            .map(|column| column.entrant.clone()),
    );
    header.push("Average".to_string());
    weekly.set_header(header);

    for &week in tables.weekly.index() {
        let mut row = vec![week.to_string()];
        for column in tables.weekly.columns() {
            row.push(
                column
                    .get(week)
                    .map_or_else(|| "-".to_string(), |points| points.to_string()),
            );
        }
        row.push(
            tables
                .summary(week)
                .map_or_else(|| "-".to_string(), |summary| summary.average_score.to_string()),
        );
        weekly.add_row(row);
    }
    println!("{weekly}");
}

/// Formats a percentile the way the dashboard shows it, two decimal places.
fn format_percentile(value: Decimal) -> String {
    format!("{:.2}%", value)
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

/// Handles the serve command: apply the port override and run the dashboard
/// server until interrupted.
async fn handle_serve(mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let host: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server host '{}'", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    dashboard_server::run_server(addr, config).await
}
