//! Tour - the persisted shape of a competition
//!
//! A tour holds players, optional teams, and a chronological list of
//! rounds. Each round carries its hole layout, a map from subject id to
//! score line, and any head-to-head pairings played in it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::FormatFlags;
use crate::course::HoleSpec;
use crate::error::{Result, ScoringError};
use crate::handicap::{course_handicap, HandicapPolicy};
use crate::score::ScoreLine;
use crate::team::TeamStrategy;

/// Caller-provided id of a player or team
pub type SubjectId = String;

/// Caller-provided id of a round
pub type RoundId = String;

/// An individual competitor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: SubjectId,
    pub name: String,
    /// Raw course handicap as stored; normalized through a `HandicapPolicy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_handicap: Option<f64>,
}

impl Player {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            course_handicap: None,
        }
    }

    pub fn with_handicap(mut self, handicap: f64) -> Self {
        self.course_handicap = Some(handicap);
        self
    }

    /// Course handicap under the given policy (0 when none is stored)
    pub fn handicap_with(&self, policy: HandicapPolicy) -> Result<u32> {
        match self.course_handicap {
            Some(raw) => course_handicap(raw, policy),
            None => Ok(0),
        }
    }

    /// Course handicap under `HandicapPolicy::Clamp`, which never fails
    pub fn playing_handicap(&self) -> u32 {
        self.handicap_with(HandicapPolicy::Clamp).unwrap_or(0)
    }
}

/// A group of players competing as one subject
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: SubjectId,
    pub name: String,
    pub member_ids: Vec<SubjectId>,
    pub captain_id: SubjectId,
}

impl Team {
    pub fn new(id: &str, name: &str, member_ids: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            member_ids: member_ids.iter().map(|m| m.to_string()).collect(),
            captain_id: member_ids.first().map(|m| m.to_string()).unwrap_or_default(),
        }
    }

    pub fn has_member(&self, player_id: &str) -> bool {
        self.member_ids.iter().any(|m| m == player_id)
    }
}

/// Anything that can appear on a leaderboard
#[derive(Clone, Debug, PartialEq)]
pub enum Subject {
    Player(Player),
    Team(Team),
}

impl Subject {
    pub fn id(&self) -> &str {
        match self {
            Subject::Player(p) => &p.id,
            Subject::Team(t) => &t.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Subject::Player(p) => &p.name,
            Subject::Team(t) => &t.name,
        }
    }

    /// True if this subject is, or includes, the given player or team id
    pub fn covers(&self, id: &str) -> bool {
        match self {
            Subject::Player(p) => p.id == id,
            Subject::Team(t) => t.id == id || t.has_member(id),
        }
    }
}

/// Playing format of a round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundFormat {
    #[default]
    StrokePlay,
    Stableford,
    MatchPlay,
    /// Match play, each side's best ball counts
    Fourball,
    /// Match play, one ball per side
    Foursomes,
    BestBall,
    Scramble,
    AlternateShot,
}

impl RoundFormat {
    /// How team scores are derived in this format
    pub fn team_strategy(self) -> TeamStrategy {
        match self {
            RoundFormat::BestBall | RoundFormat::Fourball => TeamStrategy::BestBall,
            RoundFormat::Scramble => TeamStrategy::Scramble,
            RoundFormat::StrokePlay
            | RoundFormat::Stableford
            | RoundFormat::MatchPlay
            | RoundFormat::Foursomes
            | RoundFormat::AlternateShot => TeamStrategy::SumOfIndividuals,
        }
    }
}

/// A head-to-head pairing; each side lists one or more subject ids
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPairing {
    pub side_a: Vec<SubjectId>,
    pub side_b: Vec<SubjectId>,
}

impl MatchPairing {
    pub fn singles(a: &str, b: &str) -> Self {
        Self {
            side_a: vec![a.to_string()],
            side_b: vec![b.to_string()],
        }
    }

    pub fn pairs(a: &[&str], b: &[&str]) -> Self {
        Self {
            side_a: a.iter().map(|s| s.to_string()).collect(),
            side_b: b.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One round of a tour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format: RoundFormat,
    pub holes: Vec<HoleSpec>,
    #[serde(default)]
    pub scores: BTreeMap<SubjectId, ScoreLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<MatchPairing>,
}

impl Round {
    pub fn new(id: &str, format: RoundFormat, holes: Vec<HoleSpec>) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            format,
            holes,
            scores: BTreeMap::new(),
            matches: Vec::new(),
        }
    }

    /// Record raw per-hole strokes for a subject (derived fields are left
    /// for `score_round` to fill in)
    pub fn with_strokes(mut self, subject_id: &str, strokes: &[u32]) -> Self {
        let mut line = ScoreLine::empty(subject_id, 0);
        line.per_hole_strokes = strokes.iter().map(|&s| Some(s)).collect();
        self.scores.insert(subject_id.to_string(), line);
        self
    }

    pub fn with_match(mut self, pairing: MatchPairing) -> Self {
        self.matches.push(pairing);
        self
    }

    pub fn line(&self, subject_id: &str) -> Option<&ScoreLine> {
        self.scores.get(subject_id)
    }

    pub fn holes_count(&self) -> u32 {
        self.holes.len() as u32
    }

    /// True once any subject has a recorded stroke in this round
    pub fn is_started(&self) -> bool {
        self.scores
            .values()
            .any(|line| line.per_hole_strokes.iter().any(|s| matches!(s, Some(v) if *v > 0)))
    }
}

/// Index of a round by id within an ordered round list
pub fn round_position(rounds: &[Round], id: &str) -> Result<usize> {
    rounds
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| ScoringError::UnknownRound(id.to_string()))
}

/// A full competition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub settings: FormatFlags,
    pub players: Vec<Player>,
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Rounds in playing order
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Tour {
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Team a player belongs to, if any
    pub fn team_of(&self, player_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.has_member(player_id))
    }

    pub fn round(&self, id: &str) -> Result<&Round> {
        round_position(&self.rounds, id).map(|idx| &self.rounds[idx])
    }

    pub fn round_index(&self, id: &str) -> Result<usize> {
        round_position(&self.rounds, id)
    }

    /// Display name for a player or team id, falling back to the id
    pub fn display_name(&self, id: &str) -> String {
        self.player(id)
            .map(|p| p.name.clone())
            .or_else(|| self.team(id).map(|t| t.name.clone()))
            .unwrap_or_else(|| id.to_string())
    }

    pub fn player_subjects(&self) -> Vec<Subject> {
        self.players.iter().cloned().map(Subject::Player).collect()
    }

    pub fn team_subjects(&self) -> Vec<Subject> {
        self.teams.iter().cloned().map(Subject::Team).collect()
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tour: Tour = serde_json::from_str(&content)?;
        Ok(tour)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
