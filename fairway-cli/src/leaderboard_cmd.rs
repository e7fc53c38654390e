//! Leaderboard command - rank players or teams
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), report_board()
//! - Level 3: print_text_board()
//! - Level 4: formatting utilities (common)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fairway_tournament::{
    tour_leaderboard, Leaderboard, LeaderboardConfig, LeaderboardKind, RoundSelection,
};

use crate::common::{format_change, format_to_par, open_tour};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct LeaderboardArgs {
    /// Tour JSON file
    #[arg(long, value_name = "FILE")]
    pub tour: PathBuf,

    /// Rank teams instead of players
    #[arg(long)]
    pub teams: bool,

    /// Only this round
    #[arg(long, value_name = "ROUND", conflicts_with_all = ["through", "active"])]
    pub round: Option<String>,

    /// All rounds up to and including this one
    #[arg(long, value_name = "ROUND", conflicts_with = "active")]
    pub through: Option<String>,

    /// Only the latest round with scores
    #[arg(long)]
    pub active: bool,

    /// Show only the first N entries
    #[arg(long)]
    pub top: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run leaderboard command
pub fn run(args: LeaderboardArgs) -> Result<()> {
    let (_, tour) = open_tour(&args.tour)?;
    let config = build_config(&args);

    let board = tour_leaderboard(&tour, &config)
        .with_context(|| format!("Failed to build leaderboard for {}", tour.name))?;

    tracing::info!(
        "Leaderboard for {}: {} ranked, rule {:?}",
        tour.name,
        board.entries.len(),
        board.rule
    );

    report_board(&board, &tour.name, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &LeaderboardArgs) -> LeaderboardConfig {
    let selection = match (&args.round, &args.through) {
        (Some(round), _) => RoundSelection::Single(round.clone()),
        (None, Some(round)) => RoundSelection::Through(round.clone()),
        (None, None) if args.active => RoundSelection::Active,
        (None, None) => RoundSelection::Overall,
    };
    let kind = if args.teams {
        LeaderboardKind::Team
    } else {
        LeaderboardKind::Individual
    };

    LeaderboardConfig { kind, selection }
}

fn report_board(board: &Leaderboard, title: &str, args: &LeaderboardArgs) -> Result<()> {
    let entries = match args.top {
        Some(n) => board.top_n(n),
        None => &board.entries[..],
    };

    if args.json {
        #[derive(serde::Serialize)]
        struct JsonOutput<'a> {
            rule: String,
            entries: Vec<JsonEntry<'a>>,
            not_started: Vec<&'a str>,
        }

        #[derive(serde::Serialize)]
        struct JsonEntry<'a> {
            position: String,
            #[serde(flatten)]
            entry: &'a fairway_tournament::LeaderboardEntry,
        }

        let output = JsonOutput {
            rule: format!("{:?}", board.rule),
            entries: entries
                .iter()
                .map(|entry| JsonEntry {
                    position: board.position_label(entry),
                    entry,
                })
                .collect(),
            not_started: board.not_started.iter().map(|n| n.subject_id.as_str()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_board(board, entries, title);
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_text_board(
    board: &Leaderboard,
    entries: &[fairway_tournament::LeaderboardEntry],
    title: &str,
) {
    println!("\n=== {} ({:?}) ===", title, board.rule);
    println!(
        "{:<5} {:<24} {:>6} {:>7} {:>5} {:>5}",
        "Pos", "Name", "Score", "To Par", "Thru", "Move"
    );

    for entry in entries {
        println!(
            "{:<5} {:<24} {:>6} {:>7} {:>5} {:>5}",
            board.position_label(entry),
            entry.name,
            entry.display_score,
            format_to_par(entry.to_par),
            entry.holes_played,
            format_change(entry.position_change)
        );
    }

    if !board.not_started.is_empty() {
        let names: Vec<&str> = board.not_started.iter().map(|n| n.name.as_str()).collect();
        println!("\nNot started: {}", names.join(", "));
    }
}
