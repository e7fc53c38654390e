//! Stableford points
//!
//! Points are awarded per hole from strokes relative to the effective par,
//! which is the hole's par plus the handicap strokes received on it.

use crate::course::HoleSpec;
use crate::handicap::hole_allocations;
use crate::score::ScoreLine;
use crate::team::TeamStrategy;
use crate::tour::{Player, Round, Team};

/// Points for strokes-to-effective-par, from -3 or better to +2 or worse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StablefordTable {
    points: [u32; 6],
}

impl Default for StablefordTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl StablefordTable {
    /// 5 / 4 / 3 / 2 / 1 / 0
    pub const fn standard() -> Self {
        Self {
            points: [5, 4, 3, 2, 1, 0],
        }
    }

    /// Custom table, best result first; must be non-increasing
    pub fn new(points: [u32; 6]) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0] >= w[1]));
        Self { points }
    }

    pub fn points(&self, strokes: u32, effective_par: u32) -> u32 {
        let diff = i64::from(strokes) - i64::from(effective_par);
        self.points[(diff.clamp(-3, 2) + 3) as usize]
    }
}

/// Standard Stableford points for one hole
pub fn points_for_hole(strokes: u32, effective_par: u32) -> u32 {
    StablefordTable::standard().points(strokes, effective_par)
}

/// Points per hole for a line; unplayed holes are `None`
pub fn hole_points(line: &ScoreLine, holes: &[HoleSpec], course_handicap: u32) -> Vec<Option<u32>> {
    let allocations = hole_allocations(course_handicap, holes);

    holes
        .iter()
        .zip(allocations)
        .enumerate()
        .map(|(i, (hole, received))| {
            line.strokes_on(i)
                .map(|strokes| points_for_hole(strokes, hole.par() + received))
        })
        .collect()
}

/// Points for one round
pub fn round_stableford(line: &ScoreLine, holes: &[HoleSpec], course_handicap: u32) -> u32 {
    hole_points(line, holes, course_handicap).into_iter().flatten().sum()
}

/// Points across rounds for a subject that has its own lines
pub fn tournament_stableford(subject_id: &str, rounds: &[Round], course_handicap: u32) -> u32 {
    rounds
        .iter()
        .filter_map(|round| {
            round
                .line(subject_id)
                .map(|line| round_stableford(line, &round.holes, course_handicap))
        })
        .sum()
}

/// Team points for one round, following the round's team strategy.
///
/// Sum-of-individuals adds member points, best-ball takes the best member
/// points on each hole, and scramble scores the recorded team line off
/// scratch. `handicap` maps a member to the handicap used for them.
pub fn team_round_stableford<F>(team: &Team, round: &Round, players: &[Player], handicap: F) -> u32
where
    F: Fn(&Player) -> u32,
{
    let member_points: Vec<Vec<Option<u32>>> = team
        .member_ids
        .iter()
        .filter_map(|id| {
            let line = round.line(id)?;
            let h = players.iter().find(|p| &p.id == id).map_or(0, &handicap);
            Some(hole_points(line, &round.holes, h))
        })
        .collect();

    match round.format.team_strategy() {
        TeamStrategy::SumOfIndividuals => member_points.iter().flatten().flatten().sum(),
        TeamStrategy::BestBall => (0..round.holes.len())
            .filter_map(|hole| member_points.iter().filter_map(|pts| pts[hole]).max())
            .sum(),
        TeamStrategy::Scramble => round
            .line(&team.id)
            .map_or(0, |line| round_stableford(line, &round.holes, 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::standard_eighteen;
    use crate::score::aggregate_from_holes;
    use crate::tour::RoundFormat;

    #[test]
    fn test_standard_table() {
        assert_eq!(points_for_hole(1, 4), 5); // albatross or better
        assert_eq!(points_for_hole(1, 5), 5);
        assert_eq!(points_for_hole(2, 4), 4); // eagle
        assert_eq!(points_for_hole(3, 4), 3); // birdie
        assert_eq!(points_for_hole(4, 4), 2); // par
        assert_eq!(points_for_hole(5, 4), 1); // bogey
        assert_eq!(points_for_hole(6, 4), 0);
        assert_eq!(points_for_hole(11, 4), 0);
    }

    #[test]
    fn test_effective_par_includes_received_strokes() {
        // Net par on a par 4 with one stroke received
        assert_eq!(points_for_hole(5, 5), 2);
    }

    #[test]
    fn test_modified_table() {
        let table = StablefordTable::new([8, 5, 2, 0, 0, 0]);
        assert_eq!(table.points(3, 4), 2);
        assert_eq!(table.points(2, 5), 8);
        assert_eq!(table.points(4, 4), 0);
    }

    #[test]
    fn test_round_points_with_handicap() {
        let holes = standard_eighteen();
        let strokes: Vec<Option<u32>> = holes.iter().map(|h| Some(h.par() + 1)).collect();
        let line = aggregate_from_holes("p", &strokes, &holes, 0);

        // Bogey golf off scratch: one point a hole
        assert_eq!(round_stableford(&line, &holes, 0), 18);
        // With 18 strokes every bogey is a net par
        assert_eq!(round_stableford(&line, &holes, 18), 36);
    }

    #[test]
    fn test_unplayed_holes_score_nothing() {
        let holes = standard_eighteen();
        let line = aggregate_from_holes("p", &[Some(4), None, Some(0)], &holes, 0);
        let points = hole_points(&line, &holes, 0);
        assert_eq!(points[0], Some(2));
        assert_eq!(points[1], None);
        assert_eq!(points[2], None);
        assert_eq!(round_stableford(&line, &holes, 0), 2);
    }

    #[test]
    fn test_tournament_sum() {
        let holes = standard_eighteen();
        let pars: Vec<u32> = holes.iter().map(HoleSpec::par).collect();
        let r1 = Round::new("r1", RoundFormat::Stableford, holes.clone()).with_strokes("p", &pars);
        let r2 = Round::new("r2", RoundFormat::Stableford, holes).with_strokes("p", &pars);
        let r3 = Round::new("r3", RoundFormat::Stableford, standard_eighteen());

        assert_eq!(tournament_stableford("p", &[r1, r2, r3], 0), 72);
        assert_eq!(tournament_stableford("nobody", &[], 0), 0);
    }

    #[test]
    fn test_team_points_by_strategy() {
        let holes = vec![HoleSpec::new(1, 4, 1), HoleSpec::new(2, 4, 2)];
        let players = vec![Player::new("a", "A"), Player::new("b", "B")];
        let team = Team::new("t", "T", &["a", "b"]);

        let best_ball = Round::new("r1", RoundFormat::BestBall, holes.clone())
            .with_strokes("a", &[3, 6])
            .with_strokes("b", &[5, 4]);
        // Hole 1: birdie 3 vs bogey 1; hole 2: 0 vs par 2
        assert_eq!(team_round_stableford(&team, &best_ball, &players, |_| 0), 5);

        let summed = Round::new("r2", RoundFormat::StrokePlay, holes.clone())
            .with_strokes("a", &[3, 6])
            .with_strokes("b", &[5, 4]);
        assert_eq!(team_round_stableford(&team, &summed, &players, |_| 0), 6);

        let scramble = Round::new("r3", RoundFormat::Scramble, holes).with_strokes("t", &[3, 3]);
        assert_eq!(team_round_stableford(&team, &scramble, &players, |_| 0), 6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn points_never_increase_with_strokes(strokes in 1u32..15, effective_par in 3u32..9) {
                prop_assert!(
                    points_for_hole(strokes, effective_par)
                        >= points_for_hole(strokes + 1, effective_par)
                );
            }
        }
    }
}
