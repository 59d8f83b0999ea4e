//! One-ply move selection
//!
//! Every candidate move is simulated exactly once and the resulting state is
//! scored. Dying is always worse than boxing yourself in, which is always
//! worse than any legal move, however far it is from the food.
use serde::Serialize;
use tracing::{debug, instrument};

use crate::game::{is_fatal, is_trapped, GameState};
use crate::types::{Move, N_MOVES};

/// The result of planning a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveChoice {
    /// the highest scoring move
    pub mv: Move,
    /// carrying on in the current heading kills the snake
    pub must_turn: bool,
    /// score of every move, indexed by [`Move::as_index`]
    pub scores: [i64; N_MOVES],
}

/// score for a move that ends the game
pub fn fatal_score(state: &GameState) -> i64 {
    -2 * state.area()
}

/// score for a move that cuts the head off from the tail
pub fn trapped_score(state: &GameState) -> i64 {
    -state.area()
}

/// Scores a single move from `state`. Higher is better.
pub fn score(state: &GameState, mv: Move) -> i64 {
    let simulated = state.simulate(mv);
    if is_fatal(&simulated) {
        fatal_score(state)
    } else if is_trapped(&simulated) {
        trapped_score(state)
    } else {
        state.area() - i64::from(simulated.head().manhattan_distance(&simulated.food))
    }
}

/// Picks the best scoring move. Ties go to whichever comes first in
/// [`Move::all`].
#[instrument(level = "trace", skip_all)]
pub fn choose_move(state: &GameState) -> MoveChoice {
    let moves = Move::all();
    let mut scores = [0; N_MOVES];
    for mv in moves.iter() {
        scores[mv.as_index()] = score(state, *mv);
        debug!(mv = %mv, score = scores[mv.as_index()], "scored move");
    }

    let mut best = moves[0];
    for mv in moves.iter().skip(1) {
        if scores[mv.as_index()] > scores[best.as_index()] {
            best = *mv;
        }
    }

    let must_turn = scores[state.heading.as_index()] == fatal_score(state);
    debug!(best = %best, must_turn, "chose move");

    MoveChoice {
        mv: best,
        must_turn,
        scores,
    }
}
