//! Match commands - match play status and cup points
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_matches(), run_cup() - orchestration
//! - Level 2: select_rounds(), report_matches(), report_cup()
//! - Level 3: text and JSON printers

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use fairway_core::{Round, Tour};
use fairway_tournament::{
    cup_standings, round_matches_named, CupStandings, HoleResult, PairingResult, RoundSelection,
};

use crate::common::open_tour;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchesArgs {
    /// Tour JSON file
    #[arg(long, value_name = "FILE")]
    pub tour: PathBuf,

    /// Only this round (default: every round with pairings)
    #[arg(long, value_name = "ROUND")]
    pub round: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CupArgs {
    /// Tour JSON file
    #[arg(long, value_name = "FILE")]
    pub tour: PathBuf,

    /// Count matches up to and including this round
    #[arg(long, value_name = "ROUND")]
    pub through: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Evaluated pairings of one round
struct RoundMatches<'a> {
    round: &'a Round,
    results: Vec<PairingResult>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run matches command
pub fn run_matches(args: MatchesArgs) -> Result<()> {
    let (_, tour) = open_tour(&args.tour)?;
    let rounds = match &args.round {
        Some(round) => select_rounds(&tour, &RoundSelection::Single(round.clone()))?,
        None => &tour.rounds[..],
    };

    let evaluated: Vec<RoundMatches> = rounds
        .iter()
        .filter(|round| !round.matches.is_empty())
        .map(|round| RoundMatches {
            round,
            results: round_matches_named(round, |id| tour.display_name(id)),
        })
        .collect();

    tracing::info!(
        "Evaluated {} matches over {} rounds",
        evaluated.iter().map(|r| r.results.len()).sum::<usize>(),
        evaluated.len()
    );

    report_matches(&evaluated, args.json)
}

/// Run cup command
pub fn run_cup(args: CupArgs) -> Result<()> {
    let (_, tour) = open_tour(&args.tour)?;
    if !tour.settings.is_cup_format {
        tracing::warn!("Tour {} is not set up as a cup; tallying anyway", tour.name);
    }

    let rounds = match &args.through {
        Some(round) => select_rounds(&tour, &RoundSelection::Through(round.clone()))?,
        None => &tour.rounds[..],
    };
    let standings = cup_standings(&tour, rounds);

    report_cup(&standings, &tour.name, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn select_rounds<'a>(tour: &'a Tour, selection: &RoundSelection) -> Result<&'a [Round]> {
    Ok(selection.resolve(&tour.rounds)?.current)
}

fn report_matches(evaluated: &[RoundMatches], json: bool) -> Result<()> {
    if json {
        print_json_matches(evaluated)
    } else {
        print_text_matches(evaluated);
        Ok(())
    }
}

fn report_cup(standings: &CupStandings, title: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(standings)?);
    } else {
        print_text_cup(standings, title);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_json_matches(evaluated: &[RoundMatches]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonMatch<'a> {
        round: &'a str,
        side_a: &'a str,
        side_b: &'a str,
        status: String,
        completed: bool,
        wins_a: u32,
        wins_b: u32,
        holes_remaining: u32,
        points_a: f32,
        points_b: f32,
    }

    let output: Vec<JsonMatch> = evaluated
        .iter()
        .flat_map(|rm| {
            rm.results.iter().map(move |result| {
                let state = &result.state;
                let points = state.points();
                JsonMatch {
                    round: &rm.round.id,
                    side_a: &state.side_a,
                    side_b: &state.side_b,
                    status: state.label(),
                    completed: state.completed(),
                    wins_a: state.wins_a,
                    wins_b: state.wins_b,
                    holes_remaining: state.holes_remaining,
                    points_a: points.a,
                    points_b: points.b,
                }
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text_matches(evaluated: &[RoundMatches]) {
    for rm in evaluated {
        println!("\n=== {} ===", rm.round.name);
        for result in &rm.results {
            let state = &result.state;
            let played = state
                .hole_results
                .iter()
                .filter(|r| **r != HoleResult::Unplayed)
                .count();
            println!(
                "  {} vs {}: {} (thru {})",
                state.side_a,
                state.side_b,
                state.label(),
                played
            );
        }
    }
}

fn print_text_cup(standings: &CupStandings, title: &str) {
    println!("\n=== {} ===", title);
    println!(
        "{:<20} {:>6} {:>4} {:>4} {:>4} {:>5}",
        "Team", "Points", "W", "H", "L", "Live"
    );
    for team in &standings.teams {
        println!(
            "{:<20} {:>6.1} {:>4} {:>4} {:>4} {:>5}",
            team.name, team.points, team.won, team.halved, team.lost, team.live
        );
    }

    println!(
        "\nMatches: {} of {} complete, {} live; {:.1} points wins",
        standings.matches_completed,
        standings.matches_total,
        standings.matches_live,
        standings.points_to_win()
    );
    match standings.leader() {
        Some(team) => println!("Leader: {}", team.name),
        None => println!("All square"),
    }
}
