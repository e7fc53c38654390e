//! Configuration types for leaderboards
//!
//! Level 4 - Utilities and configuration

use fairway_core::{round_position, Result, Round, RoundId};

/// Which subjects a leaderboard ranks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeaderboardKind {
    /// One row per player
    #[default]
    Individual,
    /// One row per team
    Team,
}

/// Which rounds a leaderboard covers
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RoundSelection {
    /// Every round up to the latest one with scores
    #[default]
    Overall,
    /// Only the latest round with scores
    Active,
    /// One specific round
    Single(RoundId),
    /// All rounds up to and including the given one
    Through(RoundId),
}

/// Rounds to rank on, plus the subset to diff positions against
#[derive(Clone, Copy, Debug)]
pub struct RoundWindow<'a> {
    pub current: &'a [Round],
    pub previous: Option<&'a [Round]>,
}

impl RoundSelection {
    /// Resolve against a tour's rounds (in playing order)
    pub fn resolve<'a>(&self, rounds: &'a [Round]) -> Result<RoundWindow<'a>> {
        let window = match self {
            RoundSelection::Overall => match rounds.iter().rposition(Round::is_started) {
                Some(last) => RoundWindow {
                    current: &rounds[..=last],
                    previous: (last > 0).then(|| &rounds[..last]),
                },
                None => RoundWindow {
                    current: rounds,
                    previous: None,
                },
            },
            RoundSelection::Active => {
                let current = match rounds.iter().rposition(Round::is_started) {
                    Some(last) => &rounds[last..=last],
                    None => &rounds[..0],
                };
                RoundWindow {
                    current,
                    previous: None,
                }
            }
            RoundSelection::Single(id) => {
                let idx = round_position(rounds, id)?;
                RoundWindow {
                    current: &rounds[idx..=idx],
                    previous: None,
                }
            }
            RoundSelection::Through(id) => {
                let idx = round_position(rounds, id)?;
                RoundWindow {
                    current: &rounds[..=idx],
                    previous: (idx > 0).then(|| &rounds[..idx]),
                }
            }
        };
        Ok(window)
    }
}

/// Leaderboard configuration
#[derive(Clone, Debug, Default)]
pub struct LeaderboardConfig {
    pub kind: LeaderboardKind,
    pub selection: RoundSelection,
}

impl LeaderboardConfig {
    /// Players, every round so far
    pub fn individual() -> Self {
        Self::default()
    }

    /// Teams, every round so far
    pub fn teams() -> Self {
        Self {
            kind: LeaderboardKind::Team,
            ..Default::default()
        }
    }

    /// Set the round selection
    pub fn with_selection(mut self, selection: RoundSelection) -> Self {
        self.selection = selection;
        self
    }
}
