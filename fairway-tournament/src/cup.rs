//! Cup standings - team points from head-to-head matches
//!
//! Level 2 - Phase-level implementation

use serde::{Deserialize, Serialize};

use fairway_core::{Round, Team, Tour};

use crate::match_status::{round_matches, PairingResult, Side};

/// One team's cup record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CupTeamRecord {
    pub team_id: String,
    pub name: String,
    pub points: f32,
    pub won: u32,
    pub halved: u32,
    pub lost: u32,
    /// Matches under way and not yet decided
    pub live: u32,
}

impl CupTeamRecord {
    fn new(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            name: team.name.clone(),
            points: 0.0,
            won: 0,
            halved: 0,
            lost: 0,
            live: 0,
        }
    }
}

/// Team points across the selected rounds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CupStandings {
    /// In tour order
    pub teams: Vec<CupTeamRecord>,
    pub matches_total: u32,
    pub matches_completed: u32,
    pub matches_live: u32,
}

impl CupStandings {
    /// Team with strictly the most points
    pub fn leader(&self) -> Option<&CupTeamRecord> {
        let best = self
            .teams
            .iter()
            .max_by(|a, b| a.points.total_cmp(&b.points))?;
        let tied = self.teams.iter().filter(|t| t.points == best.points).count() > 1;
        (!tied).then_some(best)
    }

    pub fn is_tied(&self) -> bool {
        !self.teams.is_empty() && self.leader().is_none()
    }

    /// Points needed to win outright
    pub fn points_to_win(&self) -> f32 {
        self.matches_total as f32 / 2.0 + 0.5
    }

    pub fn record_for(&self, team_id: &str) -> Option<&CupTeamRecord> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }
}

/// Tally cup points over the given rounds of a tour
pub fn cup_standings(tour: &Tour, rounds: &[Round]) -> CupStandings {
    let mut standings = CupStandings {
        teams: tour.teams.iter().map(CupTeamRecord::new).collect(),
        matches_total: 0,
        matches_completed: 0,
        matches_live: 0,
    };

    for round in rounds {
        for result in round_matches(round) {
            standings.matches_total += 1;
            tally(&mut standings, tour, &round.id, &result);
        }
    }

    tracing::debug!(
        "Cup standings: {}/{} matches complete, {} live",
        standings.matches_completed,
        standings.matches_total,
        standings.matches_live
    );

    standings
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

fn tally(standings: &mut CupStandings, tour: &Tour, round_id: &str, result: &PairingResult) {
    let state = &result.state;
    let completed = state.completed();
    if completed {
        standings.matches_completed += 1;
    } else if state.is_started() {
        standings.matches_live += 1;
    }

    for side in [Side::A, Side::B] {
        let members = match side {
            Side::A => &result.pairing.side_a,
            Side::B => &result.pairing.side_b,
        };
        let Some(team_id) = side_team(tour, members) else {
            tracing::warn!(
                "Round {}: side {} of match {} has no team",
                round_id,
                state.side_name(side),
                state.label()
            );
            continue;
        };
        let Some(record) = standings.teams.iter_mut().find(|t| t.team_id == team_id) else {
            continue;
        };

        if !completed {
            if state.is_started() {
                record.live += 1;
            }
            continue;
        }

        record.points += state.points_for(side);
        match state.winner() {
            Some(winner) if winner == side => record.won += 1,
            Some(_) => record.lost += 1,
            None => record.halved += 1,
        }
    }
}

/// A side belongs to the team of its first member, or to the team it names
fn side_team<'a>(tour: &'a Tour, members: &[String]) -> Option<&'a str> {
    let first = members.first()?;
    tour.team(first)
        .or_else(|| tour.team_of(first))
        .map(|t| t.id.as_str())
}
