//! Scorecard commands - show a card, record a total-only score
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_card(), run_enter_total() - orchestration
//! - Level 2: scored_round(), check_subject(), subject_line(), report_card()
//! - Level 3: print_text_card()

use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use clap::Args;

use fairway_core::{
    enter_total, hole_allocations, hole_points, score_round, team_round_line, Round, ScoreLine,
    ScoringError, TeamStrategy, Tour, TourStore,
};

use crate::common::{format_to_par, open_tour};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CardArgs {
    /// Tour JSON file
    #[arg(long, value_name = "FILE")]
    pub tour: PathBuf,

    /// Round id
    #[arg(long)]
    pub round: String,

    /// Player or team id
    #[arg(long)]
    pub subject: String,

    /// Output the scored line as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct EnterTotalArgs {
    /// Tour JSON file (rewritten in place)
    #[arg(long, value_name = "FILE")]
    pub tour: PathBuf,

    /// Round id
    #[arg(long)]
    pub round: String,

    /// Player or team id
    #[arg(long)]
    pub subject: String,

    /// Final gross score
    #[arg(long)]
    pub total: u32,

    /// Validate and print without saving
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run card command
pub fn run_card(args: CardArgs) -> Result<()> {
    let (_, tour) = open_tour(&args.tour)?;
    check_subject(&tour, &args.subject)?;

    let round = scored_round(&tour, &args.round)?;
    let line = subject_line(&tour, &round, &args.subject);

    report_card(&tour, &round, &line, args.json)
}

/// Run enter-total command
///
/// 1. Validate the subject and round (teams only in scramble rounds)
/// 2. Synthesize the per-hole card and rescore the round
/// 3. Save the tour back through the store
pub fn run_enter_total(args: EnterTotalArgs) -> Result<()> {
    let (store, mut tour) = open_tour(&args.tour)?;
    check_subject(&tour, &args.subject)?;

    let idx = tour.round_index(&args.round)?;
    let format = tour.rounds[idx].format;
    if tour.team(&args.subject).is_some() && format.team_strategy() != TeamStrategy::Scramble {
        bail!(
            "Team {} has no recorded score in {:?} round {}; enter its members' totals",
            args.subject,
            format,
            args.round
        );
    }

    let updated = enter_total(
        &tour.rounds[idx],
        &args.subject,
        args.total,
        &tour.players,
        &tour.settings,
    )
    .with_context(|| format!("Rejected total {} for {}", args.total, args.subject))?;

    let line = subject_line(&tour, &updated, &args.subject);
    tour.rounds[idx] = updated;

    if args.dry_run {
        tracing::info!("Dry run: {} not written", args.tour.display());
    } else {
        ensure!(
            store.path_for(&tour.id).file_name() == args.tour.file_name(),
            "Tour file {} holds tour '{}'; save needs it named {}.json",
            args.tour.display(),
            tour.id,
            tour.id
        );
        store.save(&tour)?;
        tracing::info!("Saved {} for {} in round {}", args.total, args.subject, args.round);
    }

    let round = tour.round(&args.round)?;
    print_text_card(&tour, round, &line);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// A round with every line rescored under the tour settings
fn scored_round(tour: &Tour, round_id: &str) -> Result<Round> {
    let round = tour.round(round_id)?;
    let scored = score_round(round, &tour.players, &tour.settings)
        .with_context(|| format!("Failed to score round {}", round_id))?;
    Ok(scored)
}

fn check_subject(tour: &Tour, subject_id: &str) -> Result<()> {
    if tour.player(subject_id).is_none() && tour.team(subject_id).is_none() {
        return Err(ScoringError::UnknownSubject(subject_id.to_string()).into());
    }
    Ok(())
}

/// A player's recorded line, or a team's line under the round's strategy
fn subject_line(tour: &Tour, round: &Round, subject_id: &str) -> ScoreLine {
    match tour.team(subject_id) {
        Some(team) => team_round_line(team, round),
        None => round
            .line(subject_id)
            .cloned()
            .unwrap_or_else(|| ScoreLine::empty(subject_id, round.holes.len())),
    }
}

fn report_card(tour: &Tour, round: &Round, line: &ScoreLine, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(line)?);
    } else {
        print_text_card(tour, round, line);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_text_card(tour: &Tour, round: &Round, line: &ScoreLine) {
    let settings = &tour.settings;
    let handicap = match tour.player(&line.subject_id) {
        Some(player) if settings.handicaps_enabled => player.playing_handicap(),
        _ => 0,
    };
    let received = hole_allocations(handicap, &round.holes);
    let points = hole_points(line, &round.holes, handicap);

    println!(
        "\n=== {}: {} ===",
        tour.display_name(&line.subject_id),
        round.name
    );
    println!("{:>4} {:>4} {:>4} {:>6} {:>4}", "Hole", "Par", "SI", "Score", "Pts");

    for (i, hole) in round.holes.iter().enumerate() {
        let strokes = line
            .strokes_on(i)
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let dots = "*".repeat(received[i] as usize);
        let pts = match points[i] {
            Some(p) if settings.stableford_enabled => p.to_string(),
            _ => String::new(),
        };
        println!(
            "{:>4} {:>4} {:>4} {:>6} {:>4}",
            hole.number,
            hole.par(),
            format!("{}{}", hole.stroke_index(), dots),
            strokes,
            pts
        );
    }

    println!(
        "\nGross {} ({}) thru {}",
        line.gross_total,
        format_to_par(line.gross_to_par),
        line.holes_played
    );
    if let (Some(net), Some(net_to_par)) = (line.net_total, line.net_to_par) {
        println!("Net   {} ({})", net, format_to_par(net_to_par));
    }
    if settings.stableford_enabled {
        let total: u32 = points.iter().flatten().sum();
        println!("Stableford {} pts", total);
    }
}
