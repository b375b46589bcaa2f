// Bounded log of recently chosen moves, with the pattern detectors built on it

use std::collections::VecDeque;

use crate::types::Direction;

/// The last few directions the agent chose, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    moves: VecDeque<Direction>,
    capacity: usize,
}

impl MoveHistory {
    pub fn new(capacity: usize) -> Self {
        MoveHistory {
            moves: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a history from moves given oldest first; only the newest
    /// `capacity` moves are kept
    pub fn from_moves<I: IntoIterator<Item = Direction>>(capacity: usize, moves: I) -> Self {
        let mut history = MoveHistory::new(capacity);
        for dir in moves {
            history.append(dir);
        }
        history
    }

    /// Records a move, evicting the oldest when full
    pub fn append(&mut self, dir: Direction) {
        if self.capacity == 0 {
            return;
        }
        if self.moves.len() == self.capacity {
            self.moves.pop_front();
        }
        self.moves.push_back(dir);
    }

    pub fn last(&self) -> Option<Direction> {
        self.moves.back().copied()
    }

    /// Iterates from the most recent move to the oldest
    pub fn iter_recent(&self) -> impl Iterator<Item = Direction> + '_ {
        self.moves.iter().rev().copied()
    }

    /// Moves oldest first
    pub fn to_vec(&self) -> Vec<Direction> {
        self.moves.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Candidate would drive straight back over the trail just laid
    pub fn is_reversal(&self, candidate: Direction) -> bool {
        self.last().map_or(false, |last| last.is_opposite(candidate))
    }

    /// Candidate would complete a self-boxing pattern with the last two moves
    ///
    /// Flags three identical moves in a row, and the eight sequences that
    /// trace three sides of a unit square (e.g. south, east, north).
    pub fn forms_partial_square(&self, candidate: Direction) -> bool {
        let mut recent = self.iter_recent();
        let (last, second_last) = match (recent.next(), recent.next()) {
            (Some(last), Some(second_last)) => (last, second_last),
            _ => return false,
        };

        if second_last == last && last == candidate {
            return true;
        }

        last.is_perpendicular(second_last) && candidate == second_last.opposite()
    }

    /// How often `candidate` appears in the history, ignoring the latest move
    pub fn earlier_occurrences(&self, candidate: Direction) -> usize {
        self.iter_recent().skip(1).filter(|&dir| dir == candidate).count()
    }
}
