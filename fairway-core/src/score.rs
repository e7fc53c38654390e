//! Score aggregation
//!
//! Turns per-hole strokes into a `ScoreLine` with gross and net totals.
//! A stroke value of 0 is treated the same as a missing one: the hole has
//! not been played yet.

use serde::{Deserialize, Serialize};

use crate::course::{HoleSpec, DEFAULT_PAR};
use crate::error::{Result, ScoringError};
use crate::tour::SubjectId;

/// Most strokes per hole a total-only entry may average
pub const MAX_AVERAGE_PER_HOLE: u32 = 8;

/// Aggregated score of one subject (player or team)
///
/// `net_total` and `net_to_par` are present exactly when
/// `handicap_strokes` is, and `handicap_strokes` is only present when it is
/// greater than zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub subject_id: SubjectId,
    /// Strokes per hole, `None` for holes not yet played
    #[serde(default)]
    pub per_hole_strokes: Vec<Option<u32>>,
    #[serde(default)]
    pub gross_total: u32,
    /// Gross relative to the par of the holes actually played
    #[serde(default)]
    pub gross_to_par: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handicap_strokes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_total: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_to_par: Option<i32>,
    #[serde(default)]
    pub holes_played: u32,
}

impl ScoreLine {
    /// Line with no holes played
    pub fn empty(subject_id: &str, holes_count: usize) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            per_hole_strokes: vec![None; holes_count],
            gross_total: 0,
            gross_to_par: 0,
            handicap_strokes: None,
            net_total: None,
            net_to_par: None,
            holes_played: 0,
        }
    }

    /// True once any stroke has been recorded
    pub fn is_started(&self) -> bool {
        self.gross_total > 0
    }

    /// True when a net figure is present
    pub fn handicap_applied(&self) -> bool {
        self.net_total.is_some()
    }

    /// Net total when present, gross otherwise
    pub fn net_or_gross(&self) -> i32 {
        self.net_total.unwrap_or(self.gross_total as i32)
    }

    /// Strokes on a hole (0-based), `None` if unplayed or out of range
    pub fn strokes_on(&self, hole: usize) -> Option<u32> {
        self.per_hole_strokes
            .get(hole)
            .copied()
            .flatten()
            .filter(|&s| s > 0)
    }

    /// Accumulate another round's line into this one.
    ///
    /// Hole lists are concatenated, totals summed, and the net figures
    /// re-derived from the summed handicap strokes so the net invariant
    /// keeps holding for tournament-wide totals.
    pub fn combine(&self, other: &ScoreLine) -> ScoreLine {
        let mut per_hole_strokes = self.per_hole_strokes.clone();
        per_hole_strokes.extend(other.per_hole_strokes.iter().copied());

        let gross_total = self.gross_total + other.gross_total;
        let gross_to_par = self.gross_to_par + other.gross_to_par;
        let handicap = self.handicap_strokes.unwrap_or(0) + other.handicap_strokes.unwrap_or(0);

        let line = ScoreLine {
            subject_id: self.subject_id.clone(),
            per_hole_strokes,
            gross_total,
            gross_to_par,
            handicap_strokes: None,
            net_total: None,
            net_to_par: None,
            holes_played: self.holes_played + other.holes_played,
        };
        with_net(line, handicap)
    }
}

/// Fill in the handicap and net fields of a line from a stroke count
pub(crate) fn with_net(mut line: ScoreLine, handicap_strokes: u32) -> ScoreLine {
    if handicap_strokes > 0 {
        let h = handicap_strokes as i32;
        line.handicap_strokes = Some(handicap_strokes);
        line.net_total = Some(line.gross_total as i32 - h);
        line.net_to_par = Some(line.gross_to_par - h);
    } else {
        line.handicap_strokes = None;
        line.net_total = None;
        line.net_to_par = None;
    }
    line
}

/// Build a line from per-hole strokes.
///
/// To-par figures are measured against the par of the played holes only, so
/// a player part-way through a round reads "thru N".
pub fn aggregate_from_holes(
    subject_id: &str,
    per_hole_strokes: &[Option<u32>],
    holes: &[HoleSpec],
    handicap_strokes: u32,
) -> ScoreLine {
    let per_hole_strokes: Vec<Option<u32>> = per_hole_strokes
        .iter()
        .map(|s| s.filter(|&v| v > 0))
        .collect();

    let mut gross_total = 0u32;
    let mut par_played = 0u32;
    let mut holes_played = 0u32;

    for (i, strokes) in per_hole_strokes.iter().enumerate() {
        if let Some(strokes) = strokes {
            gross_total += strokes;
            par_played += holes.get(i).map_or(DEFAULT_PAR, HoleSpec::par);
            holes_played += 1;
        }
    }

    with_net(
        ScoreLine {
            subject_id: subject_id.to_string(),
            per_hole_strokes,
            gross_total,
            gross_to_par: gross_total as i32 - par_played as i32,
            handicap_strokes: None,
            net_total: None,
            net_to_par: None,
            holes_played,
        },
        handicap_strokes,
    )
}

/// Spread a final total over `holes_count` holes as evenly as possible.
///
/// Every hole is seeded with `round(total / holes_count)`, then the
/// difference is walked off one stroke at a time in hole order, wrapping
/// around. Holes are never taken below 1. For `total >= holes_count` the
/// result sums to `total` and max - min is at most 1.
pub fn synthesize_distribution(total: u32, holes_count: u32) -> Vec<u32> {
    if holes_count == 0 {
        return Vec::new();
    }

    let n = holes_count as usize;
    let seed =
        ((2 * u64::from(total) + u64::from(holes_count)) / (2 * u64::from(holes_count))).max(1);
    let mut distribution = vec![seed as u32; n];
    let mut difference = i64::from(total) - seed as i64 * n as i64;

    // A full pass with nothing to decrement means the total is below N
    let mut idle = 0;
    let mut idx = 0;
    while difference != 0 && idle < n {
        if difference > 0 {
            distribution[idx] += 1;
            difference -= 1;
            idle = 0;
        } else if distribution[idx] > 1 {
            distribution[idx] -= 1;
            difference += 1;
            idle = 0;
        } else {
            idle += 1;
        }
        idx = (idx + 1) % n;
    }

    distribution
}

/// Check that a total-only entry is plausible for the round length
pub fn validate_total(total: u32, holes_count: u32) -> Result<()> {
    if total <= holes_count || total > holes_count.saturating_mul(MAX_AVERAGE_PER_HOLE) {
        return Err(ScoringError::TotalScoreOutOfRange {
            total,
            holes: holes_count,
        });
    }
    Ok(())
}

/// Build a line from a single entered total
pub fn score_from_total(
    subject_id: &str,
    total: u32,
    holes: &[HoleSpec],
    handicap_strokes: u32,
) -> Result<ScoreLine> {
    let holes_count = holes.len() as u32;
    validate_total(total, holes_count)?;

    let strokes: Vec<Option<u32>> = synthesize_distribution(total, holes_count)
        .into_iter()
        .map(Some)
        .collect();

    Ok(aggregate_from_holes(subject_id, &strokes, holes, handicap_strokes))
}
