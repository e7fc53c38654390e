//! Fairway Core - Golf scoring primitives
//!
//! This crate provides the pure computation layer of the scoring engine:
//! - Hole layouts and stroke-index handicap allocation
//! - Gross/net score aggregation (individual and team)
//! - Per-hole distribution synthesis for total-only entries
//! - Stableford point conversion
//! - The persisted tour shape and the store seam that loads it
//!
//! Every function takes a full snapshot and returns a new value. Nothing in
//! here caches derived fields; callers rescore after each raw-score change.

pub mod config;
pub mod course;
pub mod error;
pub mod handicap;
pub mod score;
pub mod scorecard;
pub mod stableford;
pub mod store;
pub mod team;
pub mod tour;

// Re-exports for convenient access
pub use config::FormatFlags;
pub use course::{standard_eighteen, total_par, validate_holes, HoleSpec, DEFAULT_PAR};
pub use error::{Result, ScoringError};
pub use handicap::{
    allocate_round_strokes, allocate_strokes_for_hole, course_handicap, hole_allocations,
    HandicapPolicy,
};
pub use score::{
    aggregate_from_holes, score_from_total, synthesize_distribution, validate_total, ScoreLine,
};
pub use scorecard::{enter_total, score_round, score_tour};
pub use stableford::{
    hole_points, points_for_hole, round_stableford, team_round_stableford, tournament_stableford,
    StablefordTable,
};
pub use store::{JsonFileStore, MemoryStore, TourStore};
pub use team::{
    aggregate_team_score, team_round_line, tournament_team_line, TeamAggregation, TeamStrategy,
};
pub use tour::{
    round_position, MatchPairing, Player, Round, RoundFormat, RoundId, Subject, SubjectId, Team,
    Tour,
};
