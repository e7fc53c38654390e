//! Match play status - hole-by-hole head-to-head evaluation
//!
//! Level 2 - Phase-level implementation
//!
//! Status is always recomputed from the full ordered list of holes. A match
//! is decided after the first played hole where the lead exceeds the holes
//! remaining, or once every hole has been played. Holes played after that
//! point are still reported but change nothing.

use serde::{Deserialize, Serialize};

use fairway_core::{MatchPairing, Round};

/// One side of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// Outcome of a single hole
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoleResult {
    Won(Side),
    Halved,
    /// Either side has no score yet
    Unplayed,
}

/// Scores of both sides on one hole; `None` or 0 means not played
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoleInput {
    pub a: Option<u32>,
    pub b: Option<u32>,
}

impl HoleInput {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
        }
    }

    pub fn result(&self) -> HoleResult {
        match (self.a.filter(|&s| s > 0), self.b.filter(|&s| s > 0)) {
            (Some(a), Some(b)) if a < b => HoleResult::Won(Side::A),
            (Some(a), Some(b)) if b < a => HoleResult::Won(Side::B),
            (Some(_), Some(_)) => HoleResult::Halved,
            _ => HoleResult::Unplayed,
        }
    }
}

/// Where a match stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Still undecided; `leader` is `None` when all square
    InProgress { leader: Option<Side>, lead: u32 },
    /// Decided by `lead` holes with `remaining` left to play
    Won { side: Side, lead: u32, remaining: u32 },
    /// All holes played, level
    Halved,
}

/// Points awarded to each side
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchPoints {
    pub a: f32,
    pub b: f32,
}

/// Full evaluation of a match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Display label of side A
    pub side_a: String,
    /// Display label of side B
    pub side_b: String,
    pub hole_results: Vec<HoleResult>,
    pub wins_a: u32,
    pub wins_b: u32,
    pub holes_remaining: u32,
    pub status: MatchStatus,
}

impl MatchState {
    pub fn completed(&self) -> bool {
        !matches!(self.status, MatchStatus::InProgress { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.status {
            MatchStatus::Won { side, .. } => Some(side),
            _ => None,
        }
    }

    pub fn lead(&self) -> u32 {
        self.wins_a.abs_diff(self.wins_b)
    }

    /// True while undecided with the lead equal to the holes left
    pub fn is_dormie(&self) -> bool {
        matches!(
            self.status,
            MatchStatus::InProgress { lead, .. } if lead > 0 && lead == self.holes_remaining
        )
    }

    /// Result notation for a won match.
    ///
    /// "3&2" when decided with holes left. A match decided on the last hole
    /// uses the match play convention instead of "N&0": "2 up" for a lead
    /// above one, and no margin for a one-hole win.
    pub fn margin(&self) -> Option<String> {
        match self.status {
            MatchStatus::Won { lead, remaining, .. } if remaining > 0 => {
                Some(format!("{}&{}", lead, remaining))
            }
            MatchStatus::Won { lead, .. } if lead > 1 => Some(format!("{} up", lead)),
            _ => None,
        }
    }

    pub fn side_name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    /// Status text, e.g. "All Square", "Dormie", "Ann 2-up", "Ann Wins 3&2"
    pub fn label(&self) -> String {
        match self.status {
            MatchStatus::InProgress { leader: None, .. } => "All Square".to_string(),
            MatchStatus::InProgress { .. } if self.is_dormie() => "Dormie".to_string(),
            MatchStatus::InProgress {
                leader: Some(side),
                lead,
            } => format!("{} {}-up", self.side_name(side), lead),
            MatchStatus::Won { side, .. } => match self.margin() {
                Some(margin) => format!("{} Wins {}", self.side_name(side), margin),
                None => format!("{} Wins", self.side_name(side)),
            },
            MatchStatus::Halved => "Halved".to_string(),
        }
    }

    /// Win 1/0, halved 0.5/0.5, nothing while in progress
    pub fn points(&self) -> MatchPoints {
        match self.status {
            MatchStatus::Won { side: Side::A, .. } => MatchPoints { a: 1.0, b: 0.0 },
            MatchStatus::Won { side: Side::B, .. } => MatchPoints { a: 0.0, b: 1.0 },
            MatchStatus::Halved => MatchPoints { a: 0.5, b: 0.5 },
            MatchStatus::InProgress { .. } => MatchPoints::default(),
        }
    }

    pub fn points_for(&self, side: Side) -> f32 {
        let points = self.points();
        match side {
            Side::A => points.a,
            Side::B => points.b,
        }
    }

    /// True once either side has won or halved a hole
    pub fn is_started(&self) -> bool {
        self.hole_results.iter().any(|r| *r != HoleResult::Unplayed)
    }
}

/// A pairing from a round together with its evaluation
#[derive(Clone, Debug)]
pub struct PairingResult {
    pub pairing: MatchPairing,
    pub state: MatchState,
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Evaluate a match from its ordered hole inputs
pub fn evaluate_match(
    side_a: &str,
    side_b: &str,
    holes: &[HoleInput],
    total_holes: u32,
) -> MatchState {
    let hole_results: Vec<HoleResult> = holes.iter().map(HoleInput::result).collect();

    let mut wins_a = 0u32;
    let mut wins_b = 0u32;
    let mut played = 0u32;
    let mut decided = None;

    for result in &hole_results {
        match result {
            HoleResult::Won(Side::A) => wins_a += 1,
            HoleResult::Won(Side::B) => wins_b += 1,
            HoleResult::Halved => {}
            HoleResult::Unplayed => continue,
        }
        played += 1;

        let remaining = total_holes.saturating_sub(played);
        let lead = wins_a.abs_diff(wins_b);
        if lead > remaining || remaining == 0 {
            decided = Some(final_status(wins_a, wins_b, remaining));
            break;
        }
    }

    let holes_remaining = total_holes.saturating_sub(played);
    let status = decided.unwrap_or_else(|| MatchStatus::InProgress {
        leader: leader(wins_a, wins_b),
        lead: wins_a.abs_diff(wins_b),
    });

    MatchState {
        side_a: side_a.to_string(),
        side_b: side_b.to_string(),
        hole_results,
        wins_a,
        wins_b,
        holes_remaining,
        status,
    }
}

/// Evaluate every pairing of a round, labelling sides with their ids
pub fn round_matches(round: &Round) -> Vec<PairingResult> {
    round_matches_named(round, |id| id.to_string())
}

/// Evaluate every pairing of a round with a display-name lookup
pub fn round_matches_named<F>(round: &Round, name: F) -> Vec<PairingResult>
where
    F: Fn(&str) -> String,
{
    round
        .matches
        .iter()
        .map(|pairing| {
            let holes = pairing_inputs(round, pairing);
            let state = evaluate_match(
                &side_label(&pairing.side_a, &name),
                &side_label(&pairing.side_b, &name),
                &holes,
                round.holes_count(),
            );
            PairingResult {
                pairing: pairing.clone(),
                state,
            }
        })
        .collect()
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

fn final_status(wins_a: u32, wins_b: u32, remaining: u32) -> MatchStatus {
    match leader(wins_a, wins_b) {
        Some(side) => MatchStatus::Won {
            side,
            lead: wins_a.abs_diff(wins_b),
            remaining,
        },
        None => MatchStatus::Halved,
    }
}

fn leader(wins_a: u32, wins_b: u32) -> Option<Side> {
    match wins_a.cmp(&wins_b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    }
}

/// Per-hole inputs for a pairing; a side's score is its best member's
fn pairing_inputs(round: &Round, pairing: &MatchPairing) -> Vec<HoleInput> {
    (0..round.holes.len())
        .map(|hole| HoleInput {
            a: side_score(round, &pairing.side_a, hole),
            b: side_score(round, &pairing.side_b, hole),
        })
        .collect()
}

fn side_score(round: &Round, members: &[String], hole: usize) -> Option<u32> {
    members
        .iter()
        .filter_map(|id| round.line(id).and_then(|line| line.strokes_on(hole)))
        .min()
}

fn side_label<F>(members: &[String], name: &F) -> String
where
    F: Fn(&str) -> String,
{
    members.iter().map(|id| name(id.as_str())).collect::<Vec<_>>().join(" & ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::{standard_eighteen, RoundFormat};

    fn holes(pairs: &[(u32, u32)]) -> Vec<HoleInput> {
        pairs.iter().map(|&(a, b)| HoleInput::new(a, b)).collect()
    }

    #[test]
    fn test_hole_result() {
        assert_eq!(HoleInput::new(3, 4).result(), HoleResult::Won(Side::A));
        assert_eq!(HoleInput::new(5, 4).result(), HoleResult::Won(Side::B));
        assert_eq!(HoleInput::new(4, 4).result(), HoleResult::Halved);
        assert_eq!(HoleInput { a: Some(4), b: None }.result(), HoleResult::Unplayed);
        assert_eq!(HoleInput::new(0, 4).result(), HoleResult::Unplayed);
    }

    #[test]
    fn test_all_square_at_start() {
        let state = evaluate_match("Ann", "Bo", &[], 18);
        assert_eq!(state.label(), "All Square");
        assert_eq!(state.holes_remaining, 18);
        assert!(!state.completed());
        assert!(!state.is_started());
        assert_eq!(state.points(), MatchPoints { a: 0.0, b: 0.0 });
    }

    #[test]
    fn test_leader_n_up() {
        let state = evaluate_match("Ann", "Bo", &holes(&[(4, 5), (4, 4), (5, 4), (3, 4)]), 18);
        assert_eq!(state.wins_a, 2);
        assert_eq!(state.wins_b, 1);
        assert_eq!(state.holes_remaining, 14);
        assert_eq!(state.label(), "Ann 1-up");
        assert_eq!(
            state.status,
            MatchStatus::InProgress { leader: Some(Side::A), lead: 1 }
        );
    }

    #[test]
    fn test_ten_and_eight() {
        let state = evaluate_match("A", "B", &holes(&[(3, 4); 10]), 18);
        assert!(state.completed());
        assert_eq!(state.winner(), Some(Side::A));
        assert_eq!(state.holes_remaining, 8);
        assert_eq!(state.margin().as_deref(), Some("10&8"));
        assert_eq!(state.label(), "A Wins 10&8");
        assert_eq!(state.points(), MatchPoints { a: 1.0, b: 0.0 });
    }

    #[test]
    fn test_dormie_before_decided() {
        let state = evaluate_match("A", "B", &holes(&[(3, 4); 9]), 18);
        assert!(state.is_dormie());
        assert_eq!(state.label(), "Dormie");
        assert!(!state.completed());
    }

    #[test]
    fn test_nine_all_halved() {
        let mut pairs = Vec::new();
        for _ in 0..9 {
            pairs.push((3, 4));
            pairs.push((5, 4));
        }
        let state = evaluate_match("A", "B", &holes(&pairs), 18);
        assert_eq!(state.wins_a, 9);
        assert_eq!(state.wins_b, 9);
        assert_eq!(state.holes_remaining, 0);
        assert_eq!(state.status, MatchStatus::Halved);
        assert_eq!(state.label(), "Halved");
        assert_eq!(state.points(), MatchPoints { a: 0.5, b: 0.5 });
    }

    #[test]
    fn test_won_on_last_hole() {
        let mut pairs = vec![(4, 4); 17];
        pairs.push((5, 4));
        let state = evaluate_match("A", "B", &holes(&pairs), 18);
        assert_eq!(state.winner(), Some(Side::B));
        assert_eq!(state.margin(), None);
        assert_eq!(state.label(), "B Wins");
        assert_eq!(state.points_for(Side::B), 1.0);

        // Two up after the last hole
        let mut pairs = vec![(4, 4); 16];
        pairs.push((3, 4));
        pairs.push((3, 4));
        let state = evaluate_match("A", "B", &holes(&pairs), 18);
        assert_eq!(state.margin().as_deref(), Some("2 up"));
        assert_eq!(state.label(), "A Wins 2 up");
    }

    #[test]
    fn test_holes_after_decision_are_ignored() {
        let mut pairs = vec![(3, 4); 10];
        pairs.extend([(5, 4); 8]);
        let state = evaluate_match("A", "B", &holes(&pairs), 18);
        assert_eq!(state.label(), "A Wins 10&8");
        assert_eq!(state.wins_b, 0);
        assert_eq!(state.hole_results.len(), 18);
        assert_eq!(state.hole_results[17], HoleResult::Won(Side::B));
    }

    #[test]
    fn test_unplayed_holes_count_as_remaining() {
        let inputs = vec![
            HoleInput::new(3, 4),
            HoleInput { a: Some(4), b: None },
            HoleInput::new(3, 4),
        ];
        let state = evaluate_match("A", "B", &inputs, 9);
        assert_eq!(state.holes_remaining, 7);
        assert_eq!(state.hole_results[1], HoleResult::Unplayed);
        assert_eq!(state.label(), "A 2-up");
    }

    #[test]
    fn test_round_matches_fourball() {
        let round = Round::new("r1", RoundFormat::Fourball, standard_eighteen())
            .with_strokes("a1", &[5, 4, 4])
            .with_strokes("a2", &[3, 5, 4])
            .with_strokes("b1", &[4, 4, 4])
            .with_strokes("b2", &[4, 4, 3])
            .with_match(MatchPairing::pairs(&["a1", "a2"], &["b1", "b2"]));

        let results = round_matches(&round);
        assert_eq!(results.len(), 1);
        let state = &results[0].state;
        assert_eq!(state.side_a, "a1 & a2");
        // Best balls: 3-4, 4-4, 4-3
        assert_eq!(state.wins_a, 1);
        assert_eq!(state.wins_b, 1);
        assert_eq!(state.holes_remaining, 15);
        assert_eq!(state.label(), "All Square");

        let named = round_matches_named(&round, |id| id.to_uppercase());
        assert_eq!(named[0].state.side_b, "B1 & B2");
    }

    #[test]
    fn test_decided_status_is_stable() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let inputs: Vec<HoleInput> = (0..18)
                .map(|_| HoleInput::new(rng.gen_range(3..7), rng.gen_range(3..7)))
                .collect();
            let full = evaluate_match("A", "B", &inputs, 18);
            assert!(full.completed());

            let decided_at = (1..=18)
                .find(|&n| evaluate_match("A", "B", &inputs[..n], 18).completed())
                .unwrap();
            for n in decided_at..=18 {
                let partial = evaluate_match("A", "B", &inputs[..n], 18);
                assert_eq!(partial.status, full.status);
                assert_eq!(partial.holes_remaining, full.holes_remaining);
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn points_always_sum_to_one_when_completed(
                scores in prop::collection::vec((1u32..8, 1u32..8), 0..=18)
            ) {
                let state = evaluate_match("A", "B", &holes(&scores), 18);
                let points = state.points();
                if state.completed() {
                    prop_assert_eq!(points.a + points.b, 1.0);
                } else {
                    prop_assert_eq!(points.a + points.b, 0.0);
                    prop_assert!(state.lead() <= state.holes_remaining);
                }
            }
        }
    }
}
