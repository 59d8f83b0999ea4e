#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Reads the board out of the images a snake game bot posts and picks the
//! next move.
//!
//! The usual flow is [`vision::read_board`] on a decoded image and its alt
//! text, then [`planner::choose_move`] on the resulting state. The
//! [`poll`] module decides whether the answer is worth voting for and
//! [`render`] turns everything into text for a reply.
//! ```plain
//! ╔════════╗
//! ║░▒░▒░▒░▒║
//! ║▒☺┐░┌←▒░║
//! ║░▒└─┘▒░▒║
//! ║▒░▒░▒░♥░║
//! ║░▒░▒░▒░▒║
//! ╚════════╝
//! ```

use game::GameState;

pub mod config;
pub mod game;
pub mod planner;
pub mod poll;
pub mod render;
pub mod types;
pub mod vision;

/// Loads a fixture from a given string. Panics unless the json describes a
/// valid state, see [`GameState::is_valid`].
pub fn game_fixture(game_fixture: &str) -> GameState {
    let g: Result<GameState, _> = serde_json::from_str(game_fixture);
    let g = g.expect("the json literal is valid");
    assert!(g.is_valid(), "not a valid game state: {}", game_fixture);
    g
}
