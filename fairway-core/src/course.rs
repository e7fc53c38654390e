//! Hole layouts
//!
//! A round is played over an ordered list of holes. Each hole carries a par
//! and a stroke index (1 = hardest). Input from the store may omit either;
//! readers resolve missing values through `HoleSpec::par` and
//! `HoleSpec::stroke_index`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

/// Par assumed for a hole whose par is missing
pub const DEFAULT_PAR: u32 = 4;

/// Lowest par accepted by `validate_holes`
pub const MIN_PAR: u32 = 3;

/// Highest par accepted by `validate_holes`
pub const MAX_PAR: u32 = 5;

/// Definition of a single hole
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleSpec {
    /// Hole number, 1-based
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub par: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yardage: Option<u32>,
}

impl HoleSpec {
    pub fn new(number: u32, par: u32, stroke_index: u32) -> Self {
        Self {
            number,
            par: Some(par),
            stroke_index: Some(stroke_index),
            yardage: None,
        }
    }

    pub fn with_yardage(mut self, yardage: u32) -> Self {
        self.yardage = Some(yardage);
        self
    }

    /// Par, falling back to `DEFAULT_PAR`
    pub fn par(&self) -> u32 {
        self.par.unwrap_or(DEFAULT_PAR)
    }

    /// Stroke index, falling back to the hole number
    pub fn stroke_index(&self) -> u32 {
        self.stroke_index.unwrap_or(self.number)
    }

    /// True when both par and stroke index were supplied
    pub fn is_complete(&self) -> bool {
        self.par.is_some() && self.stroke_index.is_some()
    }
}

/// Sum of par over all holes
pub fn total_par(holes: &[HoleSpec]) -> u32 {
    holes.iter().map(HoleSpec::par).sum()
}

/// Strict check of a round's hole list.
///
/// Every hole must have a par in 3..=5 and a stroke index, and the stroke
/// indexes must be a permutation of 1..=N. Scoring functions never call
/// this; they fall back instead. Stores accept partial layouts as well; the
/// CLI runs this when it opens a tour and logs any failure as a warning.
pub fn validate_holes(holes: &[HoleSpec]) -> Result<()> {
    let n = holes.len() as u32;
    let mut seen = vec![false; holes.len()];

    for hole in holes {
        let par = hole.par.ok_or_else(|| malformed(hole, "missing par"))?;
        if !(MIN_PAR..=MAX_PAR).contains(&par) {
            return Err(malformed(hole, &format!("par {} outside {}..={}", par, MIN_PAR, MAX_PAR)));
        }

        let si = hole
            .stroke_index
            .ok_or_else(|| malformed(hole, "missing stroke index"))?;
        if si == 0 || si > n {
            return Err(malformed(hole, &format!("stroke index {} outside 1..={}", si, n)));
        }
        let slot = &mut seen[(si - 1) as usize];
        if *slot {
            return Err(malformed(hole, &format!("duplicate stroke index {}", si)));
        }
        *slot = true;
    }

    Ok(())
}

fn malformed(hole: &HoleSpec, reason: &str) -> ScoringError {
    ScoringError::MalformedHoleSpec {
        hole: hole.number,
        reason: reason.to_string(),
    }
}

/// A par-72 eighteen with odd stroke indexes on the front nine
pub fn standard_eighteen() -> Vec<HoleSpec> {
    const PARS: [u32; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 4, 5, 4, 4, 3, 5, 4];
    const STROKE_INDEX: [u32; 18] = [7, 3, 15, 1, 11, 5, 17, 9, 13, 8, 16, 4, 12, 2, 10, 18, 6, 14];

    PARS.iter()
        .zip(STROKE_INDEX.iter())
        .enumerate()
        .map(|(i, (&par, &si))| HoleSpec::new(i as u32 + 1, par, si))
        .collect()
}
