//! Fairway CLI - Command-line interface
//!
//! Commands:
//! - leaderboard: Rank players or teams
//! - matches: Match play status by round
//! - cup: Team points for a cup
//! - card: Scorecard for one player or team
//! - enter-total: Record a total-only score

mod card_cmd;
mod common;
mod leaderboard_cmd;
mod match_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fairway")]
#[command(about = "Golf tournament scoring engine")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked leaderboard
    Leaderboard(leaderboard_cmd::LeaderboardArgs),
    /// Match play status
    Matches(match_cmd::MatchesArgs),
    /// Cup team points
    Cup(match_cmd::CupArgs),
    /// Scorecard for one subject in one round
    Card(card_cmd::CardArgs),
    /// Record a total-only score and save the tour
    EnterTotal(card_cmd::EnterTotalArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    match cli.command {
        Commands::Leaderboard(args) => leaderboard_cmd::run(args),
        Commands::Matches(args) => match_cmd::run_matches(args),
        Commands::Cup(args) => match_cmd::run_cup(args),
        Commands::Card(args) => card_cmd::run_card(args),
        Commands::EnterTotal(args) => card_cmd::run_enter_total(args),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
