// Reachability analysis: flood fill territory counting
//
// The count of empty cells reachable from a candidate destination is the
// agent's main estimate of how much room a move leaves it.

use std::collections::VecDeque;

use crate::board::Board;
use crate::types::{Direction, Position};

/// Per-evaluation visited flags, row-major like the board grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedMask {
    cells: Vec<bool>,
}

impl VisitedMask {
    /// Builds a mask from per-cell flags in row-major order
    pub fn from_cells<I: IntoIterator<Item = bool>>(cells: I) -> Self {
        VisitedMask {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    fn is_visited(&self, idx: usize) -> bool {
        self.cells[idx]
    }

    fn mark(&mut self, idx: usize) {
        self.cells[idx] = true;
    }
}

/// Counts the empty cells reachable from `start`, including `start` itself
///
/// `mask` must cover the whole board and is expected to be pre-seeded with
/// every occupied cell. Cells reached by the traversal are marked in it.
pub fn flood_fill(board: &Board, start: Position, mask: &mut VisitedMask) -> usize {
    flood_fill_ordered(board, start, mask, &Direction::all())
}

/// Flood fill with an explicit neighbor enumeration order
pub fn flood_fill_ordered(
    board: &Board,
    start: Position,
    mask: &mut VisitedMask,
    order: &[Direction],
) -> usize {
    debug_assert_eq!(mask.len(), board.area(), "mask does not match board");
    debug_assert!(board.is_inside_grid(start), "flood fill started off the grid");

    let mut area = 0;
    let mut queue = VecDeque::new();
    queue.push_back(start);
    mask.mark(board.index(start));

    while let Some(current) = queue.pop_front() {
        area += 1;

        for dir in order {
            let next = dir.apply(&current);
            if !board.is_inside_grid(next) {
                continue;
            }
            let idx = board.index(next);
            if !mask.is_visited(idx) {
                mask.mark(idx);
                queue.push_back(next);
            }
        }
    }

    area
}

/// Flood fill from `start` on a fresh mask seeded from current occupancy
pub fn reachable_area(board: &Board, start: Position) -> usize {
    let mut mask = board.occupancy_mask();
    flood_fill(board, start, &mut mask)
}
