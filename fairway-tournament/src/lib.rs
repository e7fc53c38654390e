//! Fairway Tournament - Standings built from scored rounds
//!
//! This crate provides the competition views of a tour:
//! - Match play status, hole by hole
//! - Individual and team leaderboards
//! - Cup standings from team match points
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: tour_leaderboard (orchestration)
//! - Level 2: build_leaderboard, evaluate_match, cup_standings (phases)
//! - Level 3: ranking, side scores, point tallies (steps)
//! - Level 4: round selection, configuration

mod config;
mod cup;
mod leaderboard;
mod match_status;

pub use config::{LeaderboardConfig, LeaderboardKind, RoundSelection, RoundWindow};
pub use cup::{cup_standings, CupStandings, CupTeamRecord};
pub use leaderboard::{
    build_leaderboard, competition_positions, tour_leaderboard, Leaderboard, LeaderboardEntry,
    LeaderboardRequest, NotStarted, SortRule,
};
pub use match_status::{
    evaluate_match, round_matches, round_matches_named, HoleInput, HoleResult, MatchPoints,
    MatchState, MatchStatus, PairingResult, Side,
};
