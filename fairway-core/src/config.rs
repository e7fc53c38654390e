//! Configuration types for scoring
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

use crate::handicap::HandicapPolicy;

/// Tournament-wide format switches
///
/// These decide which figures are computed and which sort rule the
/// leaderboard uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatFlags {
    pub stableford_enabled: bool,
    pub match_play_enabled: bool,
    pub handicaps_enabled: bool,
    /// Two-team event decided by team points
    pub is_cup_format: bool,
    /// Treatment of negative or fractional stored handicaps
    pub handicap_policy: HandicapPolicy,
}

impl FormatFlags {
    /// Plain gross stroke play
    pub fn stroke_play() -> Self {
        Self::default()
    }

    /// Stableford points
    pub fn stableford() -> Self {
        Self {
            stableford_enabled: true,
            ..Default::default()
        }
    }

    /// Individual match play
    pub fn match_play() -> Self {
        Self {
            match_play_enabled: true,
            ..Default::default()
        }
    }

    /// Two-team cup (match play decided by team points)
    pub fn cup() -> Self {
        Self {
            match_play_enabled: true,
            is_cup_format: true,
            ..Default::default()
        }
    }

    /// Apply handicaps
    pub fn with_handicaps(mut self) -> Self {
        self.handicaps_enabled = true;
        self
    }

    /// Set the handicap policy
    pub fn with_policy(mut self, policy: HandicapPolicy) -> Self {
        self.handicap_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let flags = FormatFlags::default();
        assert!(!flags.stableford_enabled);
        assert!(!flags.match_play_enabled);
        assert!(!flags.handicaps_enabled);
        assert!(!flags.is_cup_format);
        assert_eq!(flags.handicap_policy, HandicapPolicy::Clamp);
    }

    #[test]
    fn test_builders() {
        let flags = FormatFlags::cup().with_handicaps().with_policy(HandicapPolicy::Reject);
        assert!(flags.match_play_enabled);
        assert!(flags.is_cup_format);
        assert!(flags.handicaps_enabled);
        assert_eq!(flags.handicap_policy, HandicapPolicy::Reject);
        assert!(FormatFlags::stableford().stableford_enabled);
    }

    #[test]
    fn test_partial_json() {
        let flags: FormatFlags = serde_json::from_str(r#"{"handicaps_enabled":true}"#).unwrap();
        assert!(flags.handicaps_enabled);
        assert!(!flags.stableford_enabled);
    }
}
