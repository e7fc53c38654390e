//! Leaderboards - ranking players or teams over a set of rounds
//!
//! Level 1 - Orchestration and Level 2 - Phases
//!
//! Every view ranks through `build_leaderboard`, so sort precedence and
//! tie handling are decided in exactly one place.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use fairway_core::{
    score_tour, team_round_line, team_round_stableford, tournament_stableford, FormatFlags, Player,
    Result, Round, ScoreLine, Subject, SubjectId, Tour,
};

use crate::config::{LeaderboardConfig, LeaderboardKind};
use crate::match_status::{round_matches, Side};

/// Primary ranking rule, chosen from the format flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortRule {
    /// Most points first, fewer gross strokes breaks ties
    Stableford,
    /// Most matches won first, fewer gross strokes breaks ties
    MatchesWon,
    /// Individual view of a cup; team points are ranked separately
    CupIndividual,
    /// Lowest net score
    Net,
    /// Lowest gross score
    Gross,
}

impl SortRule {
    /// First applicable rule wins
    pub fn select(flags: &FormatFlags, handicaps_applied: bool) -> Self {
        if flags.stableford_enabled {
            SortRule::Stableford
        } else if flags.match_play_enabled && !flags.is_cup_format {
            SortRule::MatchesWon
        } else if flags.is_cup_format {
            SortRule::CupIndividual
        } else if handicaps_applied {
            SortRule::Net
        } else {
            SortRule::Gross
        }
    }

    /// Ranking key, lower is better
    fn primary_key(self, entry: &LeaderboardEntry) -> i64 {
        match self {
            SortRule::Stableford => -i64::from(entry.stableford_points.unwrap_or(0)),
            SortRule::MatchesWon => -i64::from(entry.matches_won.unwrap_or(0)),
            SortRule::CupIndividual | SortRule::Gross => i64::from(entry.gross_total),
            SortRule::Net => i64::from(entry.net_or_gross()),
        }
    }

    /// The figure shown as the score column
    fn display_score(self, entry: &LeaderboardEntry) -> i32 {
        match self {
            SortRule::Stableford => entry.stableford_points.unwrap_or(0) as i32,
            SortRule::MatchesWon => entry.matches_won.unwrap_or(0) as i32,
            SortRule::CupIndividual | SortRule::Gross => entry.gross_total as i32,
            SortRule::Net => entry.net_or_gross(),
        }
    }
}

/// One ranked row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub subject_id: SubjectId,
    pub name: String,
    /// 1-based; tied entries share a position
    pub position: u32,
    /// Places gained since the previous round subset (positive = moved up)
    pub position_change: Option<i32>,
    /// Score under the board's sort rule
    pub display_score: i32,
    /// Relative to par under the board's sort rule
    pub to_par: i32,
    pub gross_total: u32,
    pub gross_to_par: i32,
    pub net_total: Option<i32>,
    pub net_to_par: Option<i32>,
    pub holes_played: u32,
    pub rounds_played: u32,
    pub stableford_points: Option<u32>,
    pub matches_won: Option<u32>,
}

impl LeaderboardEntry {
    pub fn net_or_gross(&self) -> i32 {
        self.net_total.unwrap_or(self.gross_total as i32)
    }
}

/// A subject with no strokes in the selected rounds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotStarted {
    pub subject_id: SubjectId,
    pub name: String,
}

/// Result of a leaderboard build
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub rule: SortRule,
    /// Ranked entries, best first
    pub entries: Vec<LeaderboardEntry>,
    /// Reported separately, never ranked
    pub not_started: Vec<NotStarted>,
}

impl Leaderboard {
    pub fn leader(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    pub fn top_n(&self, n: usize) -> &[LeaderboardEntry] {
        let n = n.min(self.entries.len());
        &self.entries[..n]
    }

    pub fn entry_for(&self, subject_id: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.subject_id == subject_id)
    }

    /// "1", "T2", ...
    pub fn position_label(&self, entry: &LeaderboardEntry) -> String {
        let shared = self
            .entries
            .iter()
            .filter(|e| e.position == entry.position)
            .count();
        if shared > 1 {
            format!("T{}", entry.position)
        } else {
            entry.position.to_string()
        }
    }
}

/// Inputs to a leaderboard build; rounds are expected to be scored already
#[derive(Clone, Copy, Debug)]
pub struct LeaderboardRequest<'a> {
    pub subjects: &'a [Subject],
    /// Handicap lookup for team members
    pub players: &'a [Player],
    pub rounds: &'a [Round],
    /// Subset to diff positions against
    pub previous_rounds: Option<&'a [Round]>,
    pub flags: FormatFlags,
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Score a tour and rank it under the given configuration
pub fn tour_leaderboard(tour: &Tour, config: &LeaderboardConfig) -> Result<Leaderboard> {
    let scored = score_tour(tour)?;
    let window = config.selection.resolve(&scored.rounds)?;
    let subjects = match config.kind {
        LeaderboardKind::Individual => scored.player_subjects(),
        LeaderboardKind::Team => scored.team_subjects(),
    };

    let request = LeaderboardRequest {
        subjects: &subjects,
        players: &scored.players,
        rounds: window.current,
        previous_rounds: window.previous,
        flags: scored.settings,
    };
    Ok(build_leaderboard(&request))
}

/// Rank subjects over the requested rounds
pub fn build_leaderboard(request: &LeaderboardRequest<'_>) -> Leaderboard {
    let (mut entries, not_started) = collect_entries(request);

    let handicaps_applied =
        request.flags.handicaps_enabled && entries.iter().any(|e| e.net_total.is_some());
    let rule = SortRule::select(&request.flags, handicaps_applied);
    rank_entries(&mut entries, rule);

    if let Some(previous) = request.previous_rounds {
        let before = build_leaderboard(&LeaderboardRequest {
            rounds: previous,
            previous_rounds: None,
            ..*request
        });
        apply_position_changes(&mut entries, &before);
    }

    tracing::debug!(
        "Leaderboard over {} rounds: {} ranked, {} not started, rule {:?}",
        request.rounds.len(),
        entries.len(),
        not_started.len(),
        rule
    );

    Leaderboard {
        rule,
        entries,
        not_started,
    }
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

fn collect_entries(request: &LeaderboardRequest<'_>) -> (Vec<LeaderboardEntry>, Vec<NotStarted>) {
    let mut entries = Vec::new();
    let mut not_started = Vec::new();

    for subject in request.subjects {
        let round_lines = subject_round_lines(subject, request.rounds);
        let rounds_played = round_lines.len() as u32;
        let line = round_lines
            .iter()
            .fold(ScoreLine::empty(subject.id(), 0), |acc, l| acc.combine(l));

        if !line.is_started() {
            not_started.push(NotStarted {
                subject_id: subject.id().to_string(),
                name: subject.name().to_string(),
            });
            continue;
        }

        let flags = &request.flags;
        let stableford_points = flags
            .stableford_enabled
            .then(|| subject_stableford(subject, request));
        let matches_won = (flags.match_play_enabled && !flags.is_cup_format)
            .then(|| matches_won(subject, request.rounds));

        entries.push(LeaderboardEntry {
            subject_id: subject.id().to_string(),
            name: subject.name().to_string(),
            position: 0,
            position_change: None,
            display_score: 0,
            to_par: line.gross_to_par,
            gross_total: line.gross_total,
            gross_to_par: line.gross_to_par,
            net_total: line.net_total,
            net_to_par: line.net_to_par,
            holes_played: line.holes_played,
            rounds_played,
            stableford_points,
            matches_won,
        });
    }

    (entries, not_started)
}

fn rank_entries(entries: &mut [LeaderboardEntry], rule: SortRule) {
    entries.sort_by(|a, b| {
        rule.primary_key(a)
            .cmp(&rule.primary_key(b))
            .then(a.gross_total.cmp(&b.gross_total))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.subject_id.cmp(&b.subject_id))
    });

    let keys: Vec<i64> = entries.iter().map(|e| rule.primary_key(e)).collect();
    let positions = competition_positions(&keys);

    for (entry, position) in entries.iter_mut().zip(positions) {
        entry.position = position;
        entry.display_score = rule.display_score(entry);
        if rule == SortRule::Net {
            entry.to_par = entry.net_to_par.unwrap_or(entry.gross_to_par);
        }
    }
}

fn apply_position_changes(entries: &mut [LeaderboardEntry], before: &Leaderboard) {
    let previous: FxHashMap<&str, u32> = before
        .entries
        .iter()
        .map(|e| (e.subject_id.as_str(), e.position))
        .collect();

    for entry in entries.iter_mut() {
        entry.position_change = previous
            .get(entry.subject_id.as_str())
            .map(|&was| was as i32 - entry.position as i32);
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Standard competition ranking over sorted keys: [70, 72, 72, 72, 75]
/// gives [1, 2, 2, 2, 5]
pub fn competition_positions<K: PartialEq>(sorted_keys: &[K]) -> Vec<u32> {
    let mut positions: Vec<u32> = Vec::with_capacity(sorted_keys.len());
    for (i, key) in sorted_keys.iter().enumerate() {
        let position = match positions.last() {
            Some(&prev) if sorted_keys[i - 1] == *key => prev,
            _ => i as u32 + 1,
        };
        positions.push(position);
    }
    positions
}

/// A subject's started lines, one per round
fn subject_round_lines(subject: &Subject, rounds: &[Round]) -> Vec<ScoreLine> {
    rounds
        .iter()
        .filter_map(|round| match subject {
            Subject::Player(p) => round.line(&p.id).cloned(),
            Subject::Team(t) => Some(team_round_line(t, round)),
        })
        .filter(ScoreLine::is_started)
        .collect()
}

fn subject_stableford(subject: &Subject, request: &LeaderboardRequest<'_>) -> u32 {
    let handicaps = request.flags.handicaps_enabled;
    let handicap_of = |p: &Player| if handicaps { p.playing_handicap() } else { 0 };

    match subject {
        Subject::Player(p) => tournament_stableford(&p.id, request.rounds, handicap_of(p)),
        Subject::Team(t) => request
            .rounds
            .iter()
            .map(|round| team_round_stableford(t, round, request.players, handicap_of))
            .sum(),
    }
}

fn matches_won(subject: &Subject, rounds: &[Round]) -> u32 {
    rounds
        .iter()
        .flat_map(round_matches)
        .filter(|result| {
            let side = match result.state.winner() {
                Some(Side::A) => &result.pairing.side_a,
                Some(Side::B) => &result.pairing.side_b,
                None => return false,
            };
            side.iter().any(|id| subject.covers(id))
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundSelection;
    use fairway_core::{HoleSpec, MatchPairing, RoundFormat, Team};

    fn nine() -> Vec<HoleSpec> {
        (1..=9).map(|i| HoleSpec::new(i, 4, i)).collect()
    }

    const ALTERNATING: [u32; 9] = [4, 5, 4, 5, 4, 5, 4, 5, 4];

    fn tour(settings: FormatFlags, format: RoundFormat) -> Tour {
        let r1 = Round::new("r1", format, nine())
            .with_strokes("ann", &[5; 9])
            .with_strokes("bo", &ALTERNATING)
            .with_strokes("cy", &[5; 9])
            .with_match(MatchPairing::singles("ann", "bo"));

        Tour {
            id: "club".to_string(),
            name: "Club".to_string(),
            settings,
            players: vec![
                Player::new("ann", "Ann").with_handicap(9.0),
                Player::new("bo", "Bo"),
                Player::new("cy", "Cy").with_handicap(18.0),
                Player::new("dee", "Dee"),
            ],
            teams: vec![
                Team::new("t1", "Reds", &["ann", "bo"]),
                Team::new("t2", "Blues", &["cy", "dee"]),
            ],
            rounds: vec![r1],
        }
    }

    fn order(board: &Leaderboard) -> Vec<(&str, u32)> {
        board
            .entries
            .iter()
            .map(|e| (e.subject_id.as_str(), e.position))
            .collect()
    }

    #[test]
    fn test_competition_positions() {
        assert_eq!(competition_positions(&[70, 72, 72, 72, 75]), vec![1, 2, 2, 2, 5]);
        assert_eq!(competition_positions(&[1, 1]), vec![1, 1]);
        assert!(competition_positions::<i64>(&[]).is_empty());
    }

    #[test]
    fn test_gross_stroke_play() {
        let board = tour_leaderboard(
            &tour(FormatFlags::stroke_play(), RoundFormat::StrokePlay),
            &LeaderboardConfig::individual(),
        )
        .unwrap();

        assert_eq!(board.rule, SortRule::Gross);
        assert_eq!(order(&board), vec![("bo", 1), ("ann", 2), ("cy", 2)]);
        assert_eq!(board.leader().map(|e| e.display_score), Some(40));
        assert_eq!(
            board.not_started,
            vec![NotStarted {
                subject_id: "dee".into(),
                name: "Dee".into()
            }]
        );

        let ann = board.entry_for("ann").unwrap();
        assert_eq!(board.position_label(ann), "T2");
        assert_eq!(board.position_label(board.entry_for("bo").unwrap()), "1");
        assert_eq!(ann.to_par, 9);
        assert_eq!(ann.rounds_played, 1);
        assert_eq!(ann.position_change, None);
    }

    #[test]
    fn test_net_stroke_play() {
        let board = tour_leaderboard(
            &tour(FormatFlags::stroke_play().with_handicaps(), RoundFormat::StrokePlay),
            &LeaderboardConfig::individual(),
        )
        .unwrap();

        assert_eq!(board.rule, SortRule::Net);
        assert_eq!(order(&board), vec![("cy", 1), ("ann", 2), ("bo", 3)]);
        let cy = board.entry_for("cy").unwrap();
        assert_eq!(cy.display_score, 27);
        assert_eq!(cy.to_par, -9);
        assert_eq!(board.entry_for("bo").unwrap().display_score, 40);
    }

    #[test]
    fn test_stableford_ranks_by_points() {
        let board = tour_leaderboard(
            &tour(FormatFlags::stableford(), RoundFormat::Stableford),
            &LeaderboardConfig::individual(),
        )
        .unwrap();

        assert_eq!(board.rule, SortRule::Stableford);
        assert_eq!(order(&board), vec![("bo", 1), ("ann", 2), ("cy", 2)]);
        assert_eq!(board.entries[0].display_score, 14);
        assert_eq!(board.entries[1].stableford_points, Some(9));
    }

    #[test]
    fn test_stableford_with_handicaps() {
        let board = tour_leaderboard(
            &tour(FormatFlags::stableford().with_handicaps(), RoundFormat::Stableford),
            &LeaderboardConfig::individual(),
        )
        .unwrap();

        // Cy receives two strokes a hole: net birdie on every hole
        assert_eq!(order(&board), vec![("cy", 1), ("ann", 2), ("bo", 3)]);
        assert_eq!(board.entries[0].display_score, 27);
        assert_eq!(board.entries[1].display_score, 18);
    }

    #[test]
    fn test_match_play_ranks_by_wins() {
        let board = tour_leaderboard(
            &tour(FormatFlags::match_play(), RoundFormat::MatchPlay),
            &LeaderboardConfig::individual(),
        )
        .unwrap();

        assert_eq!(board.rule, SortRule::MatchesWon);
        assert_eq!(order(&board), vec![("bo", 1), ("ann", 2), ("cy", 2)]);
        assert_eq!(board.entries[0].matches_won, Some(1));
        assert_eq!(board.entries[1].matches_won, Some(0));
    }

    #[test]
    fn test_cup_individual_view_is_gross() {
        let board = tour_leaderboard(
            &tour(FormatFlags::cup().with_handicaps(), RoundFormat::MatchPlay),
            &LeaderboardConfig::individual(),
        )
        .unwrap();
        assert_eq!(board.rule, SortRule::CupIndividual);
        assert_eq!(order(&board)[0], ("bo", 1));
        assert_eq!(board.entries[0].matches_won, None);
    }

    #[test]
    fn test_position_changes_over_rounds() {
        let mut tour = tour(FormatFlags::stroke_play(), RoundFormat::StrokePlay);
        tour.rounds.push(
            Round::new("r2", RoundFormat::StrokePlay, nine())
                .with_strokes("ann", &[4; 9])
                .with_strokes("bo", &[5; 9])
                .with_strokes("cy", &[5; 9]),
        );

        let board = tour_leaderboard(&tour, &LeaderboardConfig::individual()).unwrap();
        assert_eq!(order(&board), vec![("ann", 1), ("bo", 2), ("cy", 3)]);
        assert_eq!(board.entry_for("ann").unwrap().position_change, Some(1));
        assert_eq!(board.entry_for("bo").unwrap().position_change, Some(-1));
        assert_eq!(board.entry_for("cy").unwrap().position_change, Some(-1));
        assert_eq!(board.entry_for("ann").unwrap().rounds_played, 2);

        let single = tour_leaderboard(
            &tour,
            &LeaderboardConfig::individual().with_selection(RoundSelection::Single("r1".into())),
        )
        .unwrap();
        assert_eq!(order(&single)[0], ("bo", 1));
        assert!(single.entries.iter().all(|e| e.position_change.is_none()));
    }

    #[test]
    fn test_team_board_uses_round_strategy() {
        let summed = tour_leaderboard(
            &tour(FormatFlags::stroke_play(), RoundFormat::StrokePlay),
            &LeaderboardConfig::teams(),
        )
        .unwrap();
        assert_eq!(summed.entry_for("t1").unwrap().gross_total, 85);
        assert_eq!(summed.entry_for("t2").unwrap().gross_total, 45);
        assert_eq!(order(&summed), vec![("t2", 1), ("t1", 2)]);

        let best_ball = tour_leaderboard(
            &tour(FormatFlags::stroke_play(), RoundFormat::BestBall),
            &LeaderboardConfig::teams(),
        )
        .unwrap();
        assert_eq!(best_ball.entry_for("t1").unwrap().gross_total, 40);
        assert_eq!(order(&best_ball), vec![("t1", 1), ("t2", 2)]);
    }

    #[test]
    fn test_unknown_round_selection() {
        let err = tour_leaderboard(
            &tour(FormatFlags::stroke_play(), RoundFormat::StrokePlay),
            &LeaderboardConfig::individual().with_selection(RoundSelection::Through("r7".into())),
        )
        .unwrap_err();
        assert_eq!(err, fairway_core::ScoringError::UnknownRound("r7".into()));
    }

    #[test]
    fn test_sort_rule_precedence() {
        let both = FormatFlags {
            stableford_enabled: true,
            match_play_enabled: true,
            ..Default::default()
        };
        assert_eq!(SortRule::select(&both, true), SortRule::Stableford);
        assert_eq!(SortRule::select(&FormatFlags::cup(), true), SortRule::CupIndividual);
        assert_eq!(SortRule::select(&FormatFlags::default(), true), SortRule::Net);
        assert_eq!(SortRule::select(&FormatFlags::default(), false), SortRule::Gross);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn equal_keys_share_positions(mut keys in prop::collection::vec(60i64..90, 0..30)) {
                keys.sort();
                let positions = competition_positions(&keys);
                for i in 0..keys.len() {
                    if i > 0 && keys[i] == keys[i - 1] {
                        prop_assert_eq!(positions[i], positions[i - 1]);
                    } else {
                        prop_assert_eq!(positions[i], i as u32 + 1);
                    }
                }
            }
        }
    }
}
