// Decision engine: scores every direction and picks the next move
//
// Per tick, each direction is taken in enumeration order through:
// 1. Legality (destination in bounds and empty)
// 2. Partial-square filter on recent history
// 3. Trap filter (reachable area below the minimum space)
// 4. Base score from reachable area
// 5. Neighborhood risk divisors
// 6. Reversal and repetition divisors
// The highest score wins, ties going to the first direction scanned.

use log::{debug, warn};

use crate::board::{locate_agent, AgentState, Board};
use crate::config::ScoringConfig;
use crate::error::EngineError;
use crate::history::MoveHistory;
use crate::reachability::reachable_area;
use crate::risk::RiskProfile;
use crate::types::{BoardSnapshot, Direction};

/// Direction returned when no move is legal at all
pub const BOXED_DEFAULT: Direction = Direction::North;

/// Truncating division; a zero divisor leaves the score unchanged
fn divide(score: usize, divisor: usize) -> usize {
    score.checked_div(divisor).unwrap_or(score)
}

/// Outcome of evaluating one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Destination is off the grid or occupied
    Illegal,
    /// Would complete a self-boxing move pattern
    PartialSquare,
    /// Too little reachable space behind the destination
    DeadEnd { area: usize },
    Scored {
        area: usize,
        risk: RiskProfile,
        score: usize,
    },
}

impl Candidate {
    pub fn score(&self) -> Option<usize> {
        match self {
            Candidate::Scored { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn is_legal(&self) -> bool {
        !matches!(self, Candidate::Illegal)
    }
}

/// How the chosen direction was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// Best-scoring candidate that passed every filter
    Scored { area: usize, score: usize },
    /// Nothing passed the filters; first legal direction taken
    Fallback,
    /// No legal direction exists; elimination is likely
    Boxed,
}

/// The move chosen for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub outcome: DecisionOutcome,
}

/// Stateful move selector; owns the move history across ticks
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    scoring: ScoringConfig,
    history: MoveHistory,
}

impl DecisionEngine {
    /// Creates an engine with empty history
    ///
    /// # Arguments
    /// * `scoring` - Scoring constants
    /// * `history_length` - How many recent moves to remember
    pub fn new(scoring: ScoringConfig, history_length: usize) -> Self {
        DecisionEngine {
            scoring,
            history: MoveHistory::new(history_length),
        }
    }

    /// Creates an engine whose history already holds `moves` (oldest first)
    pub fn with_history<I: IntoIterator<Item = Direction>>(
        scoring: ScoringConfig,
        history_length: usize,
        moves: I,
    ) -> Self {
        DecisionEngine {
            scoring,
            history: MoveHistory::from_moves(history_length, moves),
        }
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Evaluates a single direction against the current history
    pub fn evaluate(&self, board: &Board, agent: &AgentState, dir: Direction) -> Candidate {
        let destination = dir.apply(&agent.position);
        if !board.is_free(destination) {
            return Candidate::Illegal;
        }

        if self.history.forms_partial_square(dir) {
            return Candidate::PartialSquare;
        }

        let area = reachable_area(board, destination);
        if area < self.scoring.min_reachable_space {
            return Candidate::DeadEnd { area };
        }

        let risk = RiskProfile::assess(board, destination, agent.id);
        let mut score = area * self.scoring.area_weight;
        score = self.apply_risk_penalties(score, &risk);
        score = self.apply_history_penalties(score, dir);

        Candidate::Scored { area, risk, score }
    }

    fn apply_risk_penalties(&self, mut score: usize, risk: &RiskProfile) -> usize {
        let s = &self.scoring;
        if risk.adjacent_walls >= s.adjacent_wall_threshold {
            score = divide(score, risk.adjacent_walls * s.adjacent_wall_divisor);
        }
        if risk.player_walls > 0 {
            score = divide(score, risk.player_walls * s.player_wall_divisor);
        }
        if risk.diagonal_walls >= s.diagonal_wall_threshold {
            score = divide(score, risk.diagonal_walls * s.diagonal_wall_divisor);
        }
        score
    }

    fn apply_history_penalties(&self, mut score: usize, dir: Direction) -> usize {
        if self.history.is_empty() {
            return score;
        }
        if self.history.is_reversal(dir) {
            score = divide(score, self.scoring.reversal_divisor);
        }
        let occurrences = self.history.earlier_occurrences(dir);
        if occurrences > 0 {
            score = divide(score, 1 + self.scoring.repetition_weight * occurrences);
        }
        score
    }

    /// Picks among the four directions without touching history
    pub fn choose(&self, board: &Board, agent: &AgentState) -> Decision {
        let mut best: Option<(Direction, usize, usize)> = None;
        let mut first_legal = None;

        for dir in Direction::all() {
            let candidate = self.evaluate(board, agent, dir);
            debug!("{}: Direction {} evaluated as {:?}", agent.name, dir, candidate);

            if candidate.is_legal() && first_legal.is_none() {
                first_legal = Some(dir);
            }

            if let Candidate::Scored { area, score, .. } = candidate {
                if best.map_or(true, |(_, _, best_score)| score > best_score) {
                    best = Some((dir, area, score));
                }
            }
        }

        match (best, first_legal) {
            (Some((direction, area, score)), _) => Decision {
                direction,
                outcome: DecisionOutcome::Scored { area, score },
            },
            (None, Some(direction)) => {
                warn!(
                    "{}: No candidate passed filters, falling back to {}",
                    agent.name, direction
                );
                Decision {
                    direction,
                    outcome: DecisionOutcome::Fallback,
                }
            }
            (None, None) => {
                warn!(
                    "{}: No legal moves from ({}, {}), defaulting to {}",
                    agent.name, agent.position.x, agent.position.y, BOXED_DEFAULT
                );
                Decision {
                    direction: BOXED_DEFAULT,
                    outcome: DecisionOutcome::Boxed,
                }
            }
        }
    }

    /// Runs one full tick: locate ourselves, choose, and record the move
    ///
    /// # Arguments
    /// * `snapshot` - Board state for this tick
    /// * `name` - Our player name as listed in the snapshot
    ///
    /// # Returns
    /// * `Result<Decision, EngineError>` - The chosen move, or why the tick
    ///   could not be evaluated (history is untouched on error)
    pub fn decide(
        &mut self,
        snapshot: &BoardSnapshot,
        name: &str,
    ) -> Result<Decision, EngineError> {
        let board = Board::from_snapshot(snapshot)?;
        let agent = locate_agent(snapshot, name)?;

        let decision = self.choose(&board, &agent);
        self.history.append(decision.direction);

        debug!(
            "{}: Chose {} ({:?})",
            agent.name, decision.direction, decision.outcome
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use Direction::*;

    const ME: u32 = 1;
    const RIVAL: u32 = 2;

    fn engine_with(moves: &[Direction]) -> DecisionEngine {
        DecisionEngine::with_history(ScoringConfig::default(), 4, moves.iter().copied())
    }

    fn centered(size: i32) -> (BoardSnapshot, AgentState) {
        let mut snapshot = BoardSnapshot::empty(size, size);
        let pos = Position::new(size / 2, size / 2);
        snapshot.add_player(ME, "me", pos);
        let agent = locate_agent(&snapshot, "me").unwrap();
        (snapshot, agent)
    }

    #[test]
    fn test_open_board_scores() {
        // 7x7, agent in the middle: area 48, base 96, own head adjacent => /4
        let (snapshot, agent) = centered(7);
        let board = Board::from_snapshot(&snapshot).unwrap();
        let engine = engine_with(&[]);
        for dir in Direction::all() {
            assert_eq!(engine.evaluate(&board, &agent, dir).score(), Some(24));
        }
    }

    #[test]
    fn test_reversal_is_penalized() {
        let (snapshot, agent) = centered(7);
        let board = Board::from_snapshot(&snapshot).unwrap();

        let fresh = engine_with(&[]).evaluate(&board, &agent, West).score();
        let reversed = engine_with(&[East]).evaluate(&board, &agent, West).score();
        assert_eq!(fresh, Some(24));
        assert_eq!(reversed, Some(3));
    }

    #[test]
    fn test_repetition_is_penalized() {
        let (snapshot, agent) = centered(7);
        let board = Board::from_snapshot(&snapshot).unwrap();

        let repeated = engine_with(&[North, East, North]).evaluate(&board, &agent, North);
        let novel = engine_with(&[South, East, North]).evaluate(&board, &agent, North);
        // One earlier occurrence: 24 / (1 + 5)
        assert_eq!(repeated.score(), Some(4));
        assert_eq!(novel.score(), Some(24));
    }

    #[test]
    fn test_partial_square_is_excluded() {
        let (snapshot, agent) = centered(7);
        let board = Board::from_snapshot(&snapshot).unwrap();
        let engine = engine_with(&[South, East]);
        assert_eq!(engine.evaluate(&board, &agent, North), Candidate::PartialSquare);

        let decision = engine.choose(&board, &agent);
        assert_eq!(decision.direction, East);
        assert_eq!(decision.outcome, DecisionOutcome::Scored { area: 48, score: 24 });
    }

    #[test]
    fn test_dead_end_then_fallback() {
        let mut snapshot = BoardSnapshot::empty(5, 5);
        snapshot.add_player(ME, "me", Position::new(2, 2));
        for pos in [
            Position::new(2, 1),
            Position::new(1, 2),
            Position::new(3, 2),
            Position::new(1, 3),
            Position::new(3, 3),
            Position::new(2, 4),
        ] {
            snapshot.occupy(pos, RIVAL);
        }
        let board = Board::from_snapshot(&snapshot).unwrap();
        let agent = locate_agent(&snapshot, "me").unwrap();
        let engine = engine_with(&[]);

        assert_eq!(engine.evaluate(&board, &agent, South), Candidate::DeadEnd { area: 1 });
        assert_eq!(engine.evaluate(&board, &agent, North), Candidate::Illegal);

        let decision = engine.choose(&board, &agent);
        assert_eq!(decision.direction, South);
        assert_eq!(decision.outcome, DecisionOutcome::Fallback);
    }

    #[test]
    fn test_boxed_defaults_to_north() {
        let mut snapshot = BoardSnapshot::empty(3, 3);
        snapshot.add_player(ME, "me", Position::new(1, 1));
        for pos in [
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(2, 1),
            Position::new(1, 2),
        ] {
            snapshot.occupy(pos, RIVAL);
        }
        let mut engine = engine_with(&[West]);
        let decision = engine.decide(&snapshot, "me").unwrap();
        assert_eq!(decision.direction, North);
        assert_eq!(decision.outcome, DecisionOutcome::Boxed);
        assert_eq!(engine.history().to_vec(), vec![West, North]);
    }

    #[test]
    fn test_trap_filter_can_be_disabled() {
        let mut snapshot = BoardSnapshot::empty(3, 3);
        snapshot.add_player(ME, "me", Position::new(0, 0));
        let board = Board::from_snapshot(&snapshot).unwrap();
        let agent = locate_agent(&snapshot, "me").unwrap();

        let strict = engine_with(&[]);
        assert_eq!(strict.evaluate(&board, &agent, East), Candidate::DeadEnd { area: 8 });

        let scoring = ScoringConfig {
            min_reachable_space: 0,
            ..ScoringConfig::default()
        };
        let lenient = DecisionEngine::new(scoring, 4);
        assert!(lenient.evaluate(&board, &agent, East).score().is_some());
    }

    #[test]
    fn test_missing_self_leaves_history_untouched() {
        let (snapshot, _) = centered(5);
        let mut engine = engine_with(&[South]);
        let err = engine.decide(&snapshot, "someone-else").unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingSelf {
                name: "someone-else".to_string()
            }
        );
        assert_eq!(engine.history().to_vec(), vec![South]);
    }

    #[test]
    fn test_decide_appends_and_bounds_history() {
        let (snapshot, _) = centered(9);
        let mut engine = engine_with(&[East, East, South, West]);
        engine.decide(&snapshot, "me").unwrap();
        assert_eq!(engine.history().len(), 4);
        assert_eq!(engine.history().to_vec()[..3], [East, South, West]);
    }
}
