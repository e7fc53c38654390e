//! Error types for scoring operations

/// Validation failures raised by the scoring engine.
///
/// None of these are fatal; every one is returned to the caller, which
/// decides whether to reject the input or fall back.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("Invalid handicap: {0} (expected a non-negative whole number)")]
    InvalidHandicap(f64),

    #[error("Malformed hole spec for hole {hole}: {reason}")]
    MalformedHoleSpec { hole: u32, reason: String },

    #[error("Total score {total} out of range for {holes} holes")]
    TotalScoreOutOfRange { total: u32, holes: u32 },

    #[error("Unknown round: {0}")]
    UnknownRound(String),

    #[error("Unknown subject: {0}")]
    UnknownSubject(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
