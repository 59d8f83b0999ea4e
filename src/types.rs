//! various types that are useful for working with snake boards
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x offset
    pub x: i32,
    /// y offset
    pub y: i32,
}

/// A cell on the board. `y` grows downward, the same way image rows do.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    /// builds a position from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    #[allow(missing_docs)]
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }

    /// the neighbouring position one step in the direction of `mv`
    pub fn step(&self, mv: Move) -> Position {
        self.add_vec(mv.to_vector())
    }

    /// manhattan distance between two positions
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

/// number of moves available from any position
pub const N_MOVES: usize = 4;

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::Up => "up",
            Move::Down => "down",
        };
        f.pad(name)
    }
}

/// returned when a string does not name a move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a move")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

impl Move {
    /// convert this move to a vector, up is towards row zero
    pub fn to_vector(self) -> Vector {
        match self {
            Move::Left => Vector { x: -1, y: 0 },
            Move::Right => Vector { x: 1, y: 0 },
            Move::Up => Vector { x: 0, y: -1 },
            Move::Down => Vector { x: 0, y: 1 },
        }
    }

    /// all moves, in the order the planner considers them
    pub const fn all() -> [Move; N_MOVES] {
        [Move::Up, Move::Down, Move::Left, Move::Right]
    }

    /// converts this move to a usize index. indices are the same order as the `Move::all()` method
    pub fn as_index(&self) -> usize {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }

    /// the move pointing the other way
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}
