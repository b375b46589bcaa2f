// Cycles channel types
// The game delivers one GameState per tick and expects one Direction back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 2D coordinate on the grid; y grows downward
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Returns the position displaced by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True when the position lies on a `width` x `height` grid
    pub fn is_within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// Represents the four possible movement directions of a light cycle
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Returns all directions in enumeration order
    ///
    /// Candidate scanning and tie-breaking both depend on this order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    /// Unit displacement of one step in this direction
    pub fn to_vector(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// True when the two directions form a quarter turn
    pub fn is_perpendicular(&self, other: Direction) -> bool {
        *self != other && !self.is_opposite(other)
    }

    /// Calculates the next position when moving in this direction
    pub fn apply(&self, position: &Position) -> Position {
        let (dx, dy) = self.to_vector();
        position.offset(dx, dy)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parses a direction name; screen-style aliases are accepted too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "up" => Ok(Direction::North),
            "east" | "right" => Ok(Direction::East),
            "south" | "down" => Ok(Direction::South),
            "west" | "left" => Ok(Direction::West),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// A player entry of the snapshot
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Occupant id written into every grid cell of this player's trail
    pub id: u32,
    pub name: String,
    pub position: Position,
}

/// Board state for a single tick
///
/// `grid` is row-major: the occupant of (x, y) is `grid[y * width + x]`,
/// 0 meaning empty.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    pub grid: Vec<u32>,
    pub players: Vec<PlayerInfo>,
}

impl BoardSnapshot {
    /// Creates an empty board with no players
    pub fn empty(width: i32, height: i32) -> Self {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        BoardSnapshot {
            width,
            height,
            grid: vec![0; cells],
            players: Vec::new(),
        }
    }

    /// Marks a cell as occupied by `occupant`; out-of-grid positions are ignored
    pub fn occupy(&mut self, position: Position, occupant: u32) {
        if !position.is_within(self.width, self.height) {
            return;
        }
        let idx = (position.y * self.width + position.x) as usize;
        if let Some(cell) = self.grid.get_mut(idx) {
            *cell = occupant;
        }
    }

    /// Adds a player and marks its current cell with its id
    pub fn add_player(&mut self, id: u32, name: &str, position: Position) {
        self.occupy(position, id);
        self.players.push(PlayerInfo {
            id,
            name: name.to_string(),
            position,
        });
    }
}

/// Complete request received from the game channel each tick
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game_id: String,
    pub tick: u32,
    pub board: BoardSnapshot,
}
