//! Team aggregation
//!
//! The strategy is a property of each round's format, not of the tour. A
//! tournament-wide team total is the sum of per-round team lines, each built
//! with its own round's strategy.

use serde::{Deserialize, Serialize};

use crate::course::HoleSpec;
use crate::score::{aggregate_from_holes, with_net, ScoreLine};
use crate::tour::{Round, Team};

/// How a team's score is derived for a round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStrategy {
    /// Team total is the sum of member totals
    #[default]
    SumOfIndividuals,
    /// Per hole, the lowest member score counts
    BestBall,
    /// One team score is recorded directly
    Scramble,
}

impl TeamStrategy {
    /// Pair the strategy with the inputs it consumes
    pub fn bind<'a>(
        self,
        members: &'a [ScoreLine],
        recorded: Option<&'a ScoreLine>,
    ) -> TeamAggregation<'a> {
        match self {
            TeamStrategy::SumOfIndividuals => TeamAggregation::SumOfIndividuals { members },
            TeamStrategy::BestBall => TeamAggregation::BestBall { members },
            TeamStrategy::Scramble => TeamAggregation::Scramble { recorded },
        }
    }
}

/// A team strategy together with its inputs
#[derive(Clone, Copy, Debug)]
pub enum TeamAggregation<'a> {
    SumOfIndividuals { members: &'a [ScoreLine] },
    BestBall { members: &'a [ScoreLine] },
    Scramble { recorded: Option<&'a ScoreLine> },
}

/// Build a team's line for one round
pub fn aggregate_team_score(
    team_id: &str,
    aggregation: TeamAggregation<'_>,
    holes: &[HoleSpec],
) -> ScoreLine {
    match aggregation {
        TeamAggregation::SumOfIndividuals { members } => {
            sum_of_individuals(team_id, members, holes)
        }
        TeamAggregation::BestBall { members } => best_ball(team_id, members, holes),
        TeamAggregation::Scramble { recorded } => match recorded {
            Some(line) => aggregate_from_holes(
                team_id,
                &line.per_hole_strokes,
                holes,
                line.handicap_strokes.unwrap_or(0),
            ),
            None => ScoreLine::empty(team_id, holes.len()),
        },
    }
}

/// Team line for a round, using that round's strategy
pub fn team_round_line(team: &Team, round: &Round) -> ScoreLine {
    let members: Vec<ScoreLine> = team
        .member_ids
        .iter()
        .filter_map(|id| round.line(id))
        .cloned()
        .collect();
    let recorded = round.line(&team.id);

    let aggregation = round.format.team_strategy().bind(&members, recorded);
    aggregate_team_score(&team.id, aggregation, &round.holes)
}

/// Tournament-wide team line: per-round lines summed across rounds
pub fn tournament_team_line(team: &Team, rounds: &[Round]) -> ScoreLine {
    rounds
        .iter()
        .map(|round| team_round_line(team, round))
        .filter(ScoreLine::is_started)
        .fold(ScoreLine::empty(&team.id, 0), |acc, line| acc.combine(&line))
}

fn hole_span(members: &[ScoreLine], holes: &[HoleSpec]) -> usize {
    members
        .iter()
        .map(|m| m.per_hole_strokes.len())
        .max()
        .unwrap_or(0)
        .max(holes.len())
}

fn sum_of_individuals(team_id: &str, members: &[ScoreLine], holes: &[HoleSpec]) -> ScoreLine {
    let per_hole_strokes: Vec<Option<u32>> = (0..hole_span(members, holes))
        .map(|hole| {
            let scored: Vec<u32> = members.iter().filter_map(|m| m.strokes_on(hole)).collect();
            (!scored.is_empty()).then(|| scored.iter().sum::<u32>())
        })
        .collect();

    let holes_played = per_hole_strokes.iter().filter(|s| s.is_some()).count() as u32;
    let handicap: u32 = members.iter().filter_map(|m| m.handicap_strokes).sum();

    let line = ScoreLine {
        subject_id: team_id.to_string(),
        per_hole_strokes,
        gross_total: members.iter().map(|m| m.gross_total).sum(),
        gross_to_par: members.iter().map(|m| m.gross_to_par).sum(),
        handicap_strokes: None,
        net_total: None,
        net_to_par: None,
        holes_played,
    };

    // Any member with a net figure means the summed handicap is positive
    with_net(line, handicap)
}

fn best_ball(team_id: &str, members: &[ScoreLine], holes: &[HoleSpec]) -> ScoreLine {
    let per_hole_strokes: Vec<Option<u32>> = (0..hole_span(members, holes))
        .map(|hole| members.iter().filter_map(|m| m.strokes_on(hole)).min())
        .collect();

    aggregate_from_holes(team_id, &per_hole_strokes, holes, 0)
}
