use fxhash::FxHashSet;

use super::GameState;
use crate::types::{Move, Position};

impl GameState {
    /// Moves the snake one step. The head advances in the direction of `mv`
    /// and the tail cell is vacated, so the body keeps its length. The new
    /// state may be fatal; check with [`is_fatal`].
    pub fn simulate(&self, mv: Move) -> GameState {
        let mut new_state = self.clone();
        new_state.heading = mv;
        new_state.body.push_front(self.head().step(mv));
        if new_state.body.len() > 1 {
            new_state.body.pop_back();
        }
        new_state
    }
}

/// the head has left the board
pub fn collides_with_wall(state: &GameState) -> bool {
    state.off_board(state.head())
}

/// the head sits on another part of the body
pub fn collides_with_body(state: &GameState) -> bool {
    let head = state.head();
    state.body.iter().skip(1).any(|p| *p == head)
}

/// Is the game over in this state. Run this on the state *after* a move, the
/// tail has already moved out of the way by then.
pub fn is_fatal(state: &GameState) -> bool {
    collides_with_wall(state) || collides_with_body(state)
}

/// Whether the head has sealed itself off from its own tail. Every body
/// segment between the head and the tail is treated as a wall; the tail
/// keeps moving so reaching it means there is a way out.
///
/// This is a flood fill over a worklist that visits each cell at most once.
pub fn is_trapped(state: &GameState) -> bool {
    let head = state.head();
    let tail = state.tail();
    if head == tail {
        return false;
    }

    let len = state.body.len();
    let blocked: FxHashSet<Position> = state
        .body
        .iter()
        .skip(1)
        .take(len.saturating_sub(2))
        .copied()
        .collect();

    let mut visited: FxHashSet<Position> = FxHashSet::default();
    let mut stack = vec![head];
    visited.insert(head);
    let limit = state.area() as usize;

    while let Some(current) = stack.pop() {
        for mv in Move::all().iter() {
            let next = current.step(*mv);
            if next == tail {
                return false;
            }
            if state.off_board(next) || blocked.contains(&next) || visited.contains(&next) {
                continue;
            }
            visited.insert(next);
            if visited.len() > limit {
                return true;
            }
            stack.push(next);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_fixture;
    use std::collections::VecDeque;

    fn state(width: u32, height: u32, body: &[(i32, i32)], food: (i32, i32)) -> GameState {
        GameState {
            width,
            height,
            body: body.iter().map(|(x, y)| Position::new(*x, *y)).collect(),
            food: Position::new(food.0, food.1),
            heading: Move::Up,
        }
    }

    #[test]
    fn test_simulate_preserves_length() {
        let g = game_fixture(include_str!("../../fixtures/corner_8x5.json"));
        for mv in Move::all().iter() {
            let next = g.simulate(*mv);
            assert_eq!(next.body.len(), g.body.len());
            assert_eq!(next.head(), g.head().step(*mv));
            assert_eq!(next.heading, *mv);
            assert!(next.body.iter().skip(1).eq(g.body.iter().take(3)));
        }
        // the input is untouched
        assert_eq!(g, game_fixture(include_str!("../../fixtures/corner_8x5.json")));
    }

    #[test]
    fn test_simulate_single_cell_snake() {
        let g = state(3, 3, &[(1, 1)], (0, 0));
        let next = g.simulate(Move::Left);
        assert_eq!(next.body, VecDeque::from(vec![Position::new(0, 1)]));
    }

    #[test]
    fn test_collides_with_wall() {
        let g = state(3, 10, &[(2, 1), (1, 1), (0, 1)], (0, 0));
        assert!(!collides_with_wall(&g));
        let g = state(2, 10, &[(2, 1), (1, 1), (0, 1)], (0, 0));
        assert!(collides_with_wall(&g));
        let g = state(2, 10, &[(0, -1), (0, 0)], (1, 1));
        assert!(collides_with_wall(&g));
    }

    #[test]
    fn test_collides_with_body() {
        let g = state(5, 5, &[(2, 1), (1, 1), (0, 1)], (4, 4));
        assert!(!collides_with_body(&g));
        let g = state(5, 5, &[(1, 1), (2, 1), (2, 2), (1, 2), (1, 1)], (4, 4));
        assert!(collides_with_body(&g));
    }

    #[test]
    fn test_chasing_the_tail_is_not_fatal() {
        // a 2x2 square, moving into the cell the tail is leaving
        let g = state(4, 4, &[(1, 1), (2, 1), (2, 2), (1, 2)], (3, 3));
        let next = g.simulate(Move::Down);
        assert_eq!(next.head(), Position::new(1, 2));
        assert!(!is_fatal(&next));
        // but turning back into the neck is
        assert!(is_fatal(&g.simulate(Move::Right)));
    }

    #[test]
    fn test_is_fatal_matches_definition() {
        let g = game_fixture(include_str!("../../fixtures/corner_8x5.json"));
        for mv in Move::all().iter() {
            let next = g.simulate(*mv);
            let expected = next.off_board(next.head())
                || next.body.iter().skip(1).any(|p| *p == next.head());
            assert_eq!(is_fatal(&next), expected, "{}", mv);
        }
        assert!(is_fatal(&g.simulate(Move::Right)));
        assert!(!is_fatal(&g.simulate(Move::Up)));
    }

    #[test]
    fn test_open_board_is_not_trapped() {
        let g = game_fixture(include_str!("../../fixtures/corner_8x5.json"));
        assert!(!is_trapped(&g));
        assert!(!is_trapped(&state(1, 1, &[(0, 0)], (0, 0))));
        assert!(!is_trapped(&state(3, 3, &[(0, 0), (0, 1)], (2, 2))));
    }

    #[test]
    fn test_pocket_is_trapped() {
        let g = game_fixture(include_str!("../../fixtures/pocket_5x5.json"));
        assert!(!is_fatal(&g));
        assert!(is_trapped(&g));
    }

    #[test]
    fn test_wall_of_body_with_gap_is_not_trapped() {
        // same shape as the pocket but the tail is inside with the head
        let g = state(
            5,
            5,
            &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)],
            (4, 4),
        );
        assert!(!is_trapped(&g));
    }
}
