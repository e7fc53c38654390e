//! Scorecard recomputation
//!
//! Rebuilds every derived field of a round from its raw strokes. Callers run
//! this after each raw-score change and before reading totals; nothing is
//! cached between calls.

use crate::config::FormatFlags;
use crate::error::Result;
use crate::handicap::hole_allocations;
use crate::score::{aggregate_from_holes, score_from_total, ScoreLine};
use crate::tour::{Player, Round, Tour};

/// Recompute all lines of a round.
///
/// Player lines receive the handicap strokes allocated on the holes they
/// have played, so a part-finished net score stays comparable with its
/// "thru N" gross. Lines keyed by a non-player id (recorded team scores)
/// keep the handicap strokes they were stored with.
pub fn score_round(round: &Round, players: &[Player], flags: &FormatFlags) -> Result<Round> {
    let mut scored = round.clone();

    for (subject_id, line) in scored.scores.iter_mut() {
        let handicap_strokes = handicap_strokes_for(subject_id, line, round, players, flags)?;
        *line = aggregate_from_holes(
            subject_id,
            &line.per_hole_strokes,
            &round.holes,
            handicap_strokes,
        );
    }

    Ok(scored)
}

/// Recompute every round of a tour with the tour's own settings
pub fn score_tour(tour: &Tour) -> Result<Tour> {
    let mut scored = tour.clone();
    scored.rounds = tour
        .rounds
        .iter()
        .map(|round| score_round(round, &tour.players, &tour.settings))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "Scored tour {}: {} rounds, {} players",
        tour.id,
        scored.rounds.len(),
        tour.players.len()
    );

    Ok(scored)
}

/// Record a total-only score for a subject in a round.
///
/// The total is validated first; on failure the error is returned and no
/// new round is produced. On success the per-hole distribution is
/// synthesized and the whole round rescored.
pub fn enter_total(
    round: &Round,
    subject_id: &str,
    total: u32,
    players: &[Player],
    flags: &FormatFlags,
) -> Result<Round> {
    let line = score_from_total(subject_id, total, &round.holes, 0)?;

    let mut updated = round.clone();
    updated.scores.insert(subject_id.to_string(), line);
    score_round(&updated, players, flags)
}

fn handicap_strokes_for(
    subject_id: &str,
    line: &ScoreLine,
    round: &Round,
    players: &[Player],
    flags: &FormatFlags,
) -> Result<u32> {
    if !flags.handicaps_enabled {
        return Ok(0);
    }

    let Some(player) = players.iter().find(|p| p.id == subject_id) else {
        return Ok(line.handicap_strokes.unwrap_or(0));
    };

    let handicap = match player.handicap_with(flags.handicap_policy) {
        Ok(handicap) => handicap,
        Err(e) => {
            tracing::warn!("Player {} in round {}: {}", player.id, round.id, e);
            return Err(e);
        }
    };

    let received = hole_allocations(handicap, &round.holes)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| line.strokes_on(*i).is_some())
        .map(|(_, strokes)| strokes)
        .sum();

    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{standard_eighteen, HoleSpec};
    use crate::error::ScoringError;
    use crate::handicap::HandicapPolicy;
    use crate::tour::RoundFormat;

    fn players() -> Vec<Player> {
        vec![
            Player::new("ann", "Ann").with_handicap(18.0),
            Player::new("bo", "Bo"),
            Player::new("cy", "Cy").with_handicap(-4.0),
        ]
    }

    fn round() -> Round {
        let pars: Vec<u32> = standard_eighteen().iter().map(HoleSpec::par).collect();
        Round::new("r1", RoundFormat::StrokePlay, standard_eighteen())
            .with_strokes("ann", &pars)
            .with_strokes("bo", &[5, 5, 5])
    }

    #[test]
    fn test_score_round_gross_only() {
        let scored = score_round(&round(), &players(), &FormatFlags::default()).unwrap();
        let ann = scored.line("ann").unwrap();
        assert_eq!(ann.gross_total, 72);
        assert_eq!(ann.gross_to_par, 0);
        assert_eq!(ann.net_total, None);

        let bo = scored.line("bo").unwrap();
        assert_eq!(bo.gross_total, 15);
        assert_eq!(bo.holes_played, 3);
    }

    #[test]
    fn test_score_round_with_handicaps() {
        let flags = FormatFlags::default().with_handicaps();
        let scored = score_round(&round(), &players(), &flags).unwrap();

        let ann = scored.line("ann").unwrap();
        assert_eq!(ann.handicap_strokes, Some(18));
        assert_eq!(ann.net_total, Some(54));
        assert_eq!(ann.net_to_par, Some(-18));

        // Bo has no handicap stored
        assert_eq!(scored.line("bo").unwrap().net_total, None);
    }

    #[test]
    fn test_partial_round_receives_strokes_on_played_holes() {
        let flags = FormatFlags::default().with_handicaps();
        let players = vec![Player::new("bo", "Bo").with_handicap(9.0)];
        let scored = score_round(&round(), &players, &flags).unwrap();

        // Holes 1-3 carry SI 7, 3 and 15; a 9 handicap gets strokes on the first two
        let bo = scored.line("bo").unwrap();
        assert_eq!(bo.handicap_strokes, Some(2));
        assert_eq!(bo.net_total, Some(13));
    }

    #[test]
    fn test_reject_policy_surfaces_invalid_handicap() {
        let flags = FormatFlags::default()
            .with_handicaps()
            .with_policy(HandicapPolicy::Reject);
        let round = round().with_strokes("cy", &[4]);
        let err = score_round(&round, &players(), &flags).unwrap_err();
        assert_eq!(err, ScoringError::InvalidHandicap(-4.0));

        // Clamp treats the same player as scratch
        let clamped =
            score_round(&round, &players(), &FormatFlags::default().with_handicaps()).unwrap();
        assert_eq!(clamped.line("cy").unwrap().net_total, None);
    }

    #[test]
    fn test_enter_total() {
        let flags = FormatFlags::default().with_handicaps();
        let base = round();
        let updated = enter_total(&base, "bo", 81, &players(), &flags).unwrap();
        let bo = updated.line("bo").unwrap();
        assert_eq!(bo.gross_total, 81);
        assert_eq!(bo.holes_played, 18);
        assert_eq!(bo.per_hole_strokes.len(), 18);

        let err = enter_total(&base, "bo", 12, &players(), &flags).unwrap_err();
        assert_eq!(err, ScoringError::TotalScoreOutOfRange { total: 12, holes: 18 });
        // The original round is untouched either way
        assert_eq!(base.line("bo").unwrap().per_hole_strokes.len(), 3);
    }

    #[test]
    fn test_score_tour_uses_settings() {
        let tour = Tour {
            id: "t".to_string(),
            name: "T".to_string(),
            settings: FormatFlags::default().with_handicaps(),
            players: players(),
            teams: Vec::new(),
            rounds: vec![round()],
        };
        let scored = score_tour(&tour).unwrap();
        assert_eq!(scored.rounds[0].line("ann").unwrap().net_total, Some(54));
    }
}
