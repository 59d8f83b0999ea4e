//! The game state the planner works on
mod simulator;

use crate::types::{Move, Position};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub use simulator::{collides_with_body, collides_with_wall, is_fatal, is_trapped};

/// Everything the planner needs to know about a board. Moves never modify a
/// state in place, see [`GameState::simulate`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    #[allow(missing_docs)]
    pub width: u32,
    #[allow(missing_docs)]
    pub height: u32,
    /// head first
    pub body: VecDeque<Position>,
    #[allow(missing_docs)]
    pub food: Position,
    /// the direction the snake is currently travelling
    pub heading: Move,
}

impl GameState {
    /// Panics on an empty body. States built by the reader always have a
    /// head; check [`GameState::is_valid`] on anything deserialized.
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Panics on an empty body, like [`GameState::head`]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// number of cells on the board
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    #[allow(missing_docs)]
    pub fn off_board(&self, position: Position) -> bool {
        position.x < 0
            || position.x >= self.width as i32
            || position.y < 0
            || position.y >= self.height as i32
    }

    /// A state as it could come out of a real game: a non empty body with no
    /// repeated cells, all on the board, and food somewhere the snake is not.
    pub fn is_valid(&self) -> bool {
        if self.width == 0 || self.height == 0 || self.body.is_empty() {
            return false;
        }
        if self.body.iter().any(|p| self.off_board(*p)) {
            return false;
        }
        let mut seen = fxhash::FxHashSet::default();
        if !self.body.iter().all(|p| seen.insert(*p)) {
            return false;
        }
        !self.off_board(self.food) && !seen.contains(&self.food)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let position = Position::new(x, y);
                if self.head() == position {
                    write!(f, "H")?;
                } else if self.body.contains(&position) {
                    write!(f, "s")?;
                } else if self.food == position {
                    write!(f, "f")?;
                } else {
                    write!(f, ".")?;
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "(length: {} head: {} heading: {})",
            self.body.len(),
            self.head(),
            self.heading
        )
    }
}
