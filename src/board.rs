// Board model: a validated, read-only view over one tick's snapshot

use crate::error::EngineError;
use crate::reachability::VisitedMask;
use crate::types::{BoardSnapshot, Position};

/// Occupant id of an empty cell
pub const EMPTY: u32 = 0;

/// Typed view over the grid of a `BoardSnapshot`
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    width: i32,
    height: i32,
    grid: &'a [u32],
}

impl<'a> Board<'a> {
    /// Validates the snapshot dimensions and wraps its grid
    pub fn from_snapshot(snapshot: &'a BoardSnapshot) -> Result<Self, EngineError> {
        if snapshot.width <= 0 || snapshot.height <= 0 {
            return Err(EngineError::InvalidSnapshot {
                reason: format!(
                    "non-positive dimensions {}x{}",
                    snapshot.width, snapshot.height
                ),
            });
        }

        let expected = snapshot.width as usize * snapshot.height as usize;
        if snapshot.grid.len() != expected {
            return Err(EngineError::InvalidSnapshot {
                reason: format!(
                    "grid has {} cells, expected {} for {}x{}",
                    snapshot.grid.len(),
                    expected,
                    snapshot.width,
                    snapshot.height
                ),
            });
        }

        Ok(Board {
            width: snapshot.width,
            height: snapshot.height,
            grid: &snapshot.grid,
        })
    }

    /// Number of cells on the board
    pub fn area(&self) -> usize {
        self.grid.len()
    }

    pub fn is_inside_grid(&self, pos: Position) -> bool {
        pos.is_within(self.width, self.height)
    }

    /// Row-major index of an in-bounds position
    pub(crate) fn index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Occupant of `pos`
    ///
    /// # Panics
    /// If `pos` is outside the grid. Callers bounds-check first.
    pub fn cell(&self, pos: Position) -> u32 {
        assert!(
            self.is_inside_grid(pos),
            "cell query out of bounds: ({}, {}) on {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        self.grid[self.index(pos)]
    }

    /// In-bounds and unoccupied
    pub fn is_free(&self, pos: Position) -> bool {
        self.is_inside_grid(pos) && self.cell(pos) == EMPTY
    }

    /// Out-of-bounds or occupied
    pub fn is_blocked(&self, pos: Position) -> bool {
        !self.is_free(pos)
    }

    /// Mask with every currently occupied cell already marked visited
    pub fn occupancy_mask(&self) -> VisitedMask {
        VisitedMask::from_cells(self.grid.iter().map(|&cell| cell != EMPTY))
    }
}

/// The evaluating agent's identity and position for one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentState {
    pub id: u32,
    pub name: String,
    pub position: Position,
}

/// Finds our own player entry by name
///
/// The name must match exactly one player; a duplicate is rejected rather
/// than guessed at.
pub fn locate_agent(snapshot: &BoardSnapshot, name: &str) -> Result<AgentState, EngineError> {
    let mut matches = snapshot.players.iter().filter(|p| p.name == name);
    let player = matches.next().ok_or_else(|| EngineError::MissingSelf {
        name: name.to_string(),
    })?;

    let duplicates = matches.count();
    if duplicates > 0 {
        return Err(EngineError::InvalidSnapshot {
            reason: format!("player name '{}' appears {} times", name, duplicates + 1),
        });
    }

    let p = player.position;
    if !p.is_within(snapshot.width, snapshot.height) {
        return Err(EngineError::InvalidSnapshot {
            reason: format!("player '{}' at ({}, {}) is off the grid", name, p.x, p.y),
        });
    }

    Ok(AgentState {
        id: player.id,
        name: player.name.clone(),
        position: player.position,
    })
}
