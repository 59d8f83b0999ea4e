//! Text output: the board drawn with box characters and the posts the bot
//! replies with.
use std::fmt;

use crate::planner::MoveChoice;
use crate::types::{Move, Position};
use crate::vision::{Adjacency, Cell, Grid, SlotKind};

/// The character a cell is drawn with. Empty cells alternate between two
/// shades like a checkerboard so the grid is easy to count.
pub fn glyph(cell: &Cell, position: Position) -> char {
    match cell.kind {
        SlotKind::Head => '☺',
        SlotKind::Food => '♥',
        SlotKind::Snake => segment_glyph(cell.adjacency),
        SlotKind::Empty if (position.x + position.y) % 2 == 0 => '░',
        SlotKind::Empty => '▒',
        SlotKind::Undefined => '?',
    }
}

/// Ends of the body point at their only neighbour, everything else is a pipe
/// joining its two neighbours.
pub fn segment_glyph(adjacency: Adjacency) -> char {
    match adjacency {
        Adjacency::UP => '↑',
        Adjacency::DOWN => '↓',
        Adjacency::LEFT => '←',
        Adjacency::RIGHT => '→',
        Adjacency::UP_DOWN => '│',
        Adjacency::LEFT_RIGHT => '─',
        Adjacency::UP_RIGHT => '└',
        Adjacency::UP_LEFT => '┘',
        Adjacency::DOWN_RIGHT => '┌',
        Adjacency::DOWN_LEFT => '┐',
        _ => '?',
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bar = "═".repeat(self.width() as usize);
        writeln!(f, "╔{}╗", bar)?;
        for y in 0..self.height() as i32 {
            write!(f, "║")?;
            for x in 0..self.width() as i32 {
                let position = Position::new(x, y);
                let cell = self.get(position).copied().unwrap_or_default();
                write!(f, "{}", glyph(&cell, position))?;
            }
            writeln!(f, "║")?;
        }
        write!(f, "╚{}╝", bar)
    }
}

/// One line per move with its score, best move marked
pub fn scores_text(choice: &MoveChoice) -> String {
    Move::all()
        .iter()
        .map(|mv| {
            let marker = if *mv == choice.mv { " <" } else { "" };
            format!("{:>5}: {}{}", mv, choice.scores[mv.as_index()], marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The reply posted under each new board
pub fn reply_text(grid: &Grid, choice: &MoveChoice) -> String {
    let mut text = format!("{}\n\nI'd move {}.", grid, choice.mv);
    if choice.must_turn {
        text.push_str(" Going straight on is the end of the snake, so turning matters this time!");
    }
    text
}

/// Posted just before the bot casts a vote in an empty poll
pub fn vote_status(mv: Move) -> String {
    format!(
        "Nobody has voted and I am worried that the snake is doomed if nothing is done! \
         I usually don't vote, but this time, I'm voting to move {}.",
        mv
    )
}
