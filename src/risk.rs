// Local risk assessment around a candidate destination

use crate::board::{Board, EMPTY};
use crate::types::{Direction, Position};

/// Diagonal displacements around a cell
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Obstacle counts in the 8-neighborhood of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskProfile {
    /// Orthogonal neighbors that are off the grid or occupied
    pub adjacent_walls: usize,
    /// Orthogonal neighbors occupied by our own trail
    pub player_walls: usize,
    /// Diagonal neighbors that are off the grid or occupied
    pub diagonal_walls: usize,
}

impl RiskProfile {
    /// Inspects the neighbors of `destination`; `own_id` identifies our trail
    pub fn assess(board: &Board, destination: Position, own_id: u32) -> Self {
        let mut profile = RiskProfile::default();

        for dir in Direction::all() {
            let neighbor = dir.apply(&destination);
            if !board.is_inside_grid(neighbor) {
                profile.adjacent_walls += 1;
                continue;
            }
            let occupant = board.cell(neighbor);
            if occupant != EMPTY {
                profile.adjacent_walls += 1;
                if occupant == own_id {
                    profile.player_walls += 1;
                }
            }
        }

        profile.diagonal_walls = DIAGONAL_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| board.is_blocked(destination.offset(dx, dy)))
            .count();

        profile
    }
}
