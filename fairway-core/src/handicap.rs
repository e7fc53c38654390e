//! Handicap stroke allocation
//!
//! A course handicap is spread over the holes of a round by stroke index:
//! every hole receives `handicap / N` strokes, and the `handicap % N`
//! hardest holes (lowest stroke index) receive one more.

use serde::{Deserialize, Serialize};

use crate::course::HoleSpec;
use crate::error::{Result, ScoringError};

/// How a raw handicap that is not a non-negative whole number is treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandicapPolicy {
    /// Return `ScoringError::InvalidHandicap`
    Reject,
    /// Negative becomes 0, fractional is rounded
    #[default]
    Clamp,
}

/// Normalize a raw course handicap under the given policy
pub fn course_handicap(raw: f64, policy: HandicapPolicy) -> Result<u32> {
    if !raw.is_finite() {
        return Err(ScoringError::InvalidHandicap(raw));
    }

    let whole = raw.fract() == 0.0;
    match policy {
        HandicapPolicy::Reject if raw < 0.0 || !whole => Err(ScoringError::InvalidHandicap(raw)),
        HandicapPolicy::Reject => Ok(raw as u32),
        HandicapPolicy::Clamp if raw <= 0.0 => Ok(0),
        HandicapPolicy::Clamp => Ok(raw.round() as u32),
    }
}

/// Strokes received on a single hole
pub fn allocate_strokes_for_hole(handicap: u32, stroke_index: u32, holes_count: u32) -> u32 {
    if holes_count == 0 {
        return 0;
    }

    let base = handicap / holes_count;
    let remainder = handicap % holes_count;
    let extra = stroke_index >= 1 && stroke_index <= remainder;

    base + u32::from(extra)
}

/// Strokes received on each hole, in hole order
pub fn hole_allocations(handicap: u32, holes: &[HoleSpec]) -> Vec<u32> {
    let incomplete = holes.iter().filter(|h| !h.is_complete()).count();
    if incomplete > 0 {
        tracing::warn!(
            "{} of {} holes lack par or stroke index; using par {} and hole number",
            incomplete,
            holes.len(),
            crate::course::DEFAULT_PAR
        );
    }

    let n = holes.len() as u32;
    holes
        .iter()
        .map(|hole| allocate_strokes_for_hole(handicap, hole.stroke_index(), n))
        .collect()
}

/// Total strokes received over the given holes
pub fn allocate_round_strokes(handicap: u32, holes: &[HoleSpec]) -> u32 {
    hole_allocations(handicap, holes).iter().sum()
}
