use itertools::Itertools;
use std::collections::VecDeque;

use super::{Adjacency, Grid, ReadError, SlotKind};
use crate::game::GameState;
use crate::types::{Move, Position};

/// The single cell drawn with eyes
pub fn find_head(grid: &Grid) -> Result<Position, ReadError> {
    let heads = grid.positions_of(SlotKind::Head).collect_vec();
    match heads.len() {
        0 => Err(ReadError::HeadNotFound),
        1 => Ok(heads[0]),
        count => Err(ReadError::MultipleHeads { count }),
    }
}

/// Follows the adjacency bits from the head until a cell has nowhere left to
/// go but back, which is the tail. Returns the body head first.
pub fn snake_shape(grid: &Grid) -> Result<VecDeque<Position>, ReadError> {
    let head = find_head(grid)?;
    let limit = (grid.width() * grid.height()) as usize;

    let mut body = VecDeque::new();
    let mut current = head;
    let mut came_from: Option<Move> = None;
    let mut steps = 0;

    loop {
        body.push_back(current);

        let cell = grid
            .get(current)
            .filter(|cell| cell.kind.is_snake())
            .ok_or(ReadError::InvalidAdjacency { position: current })?;

        let mut remaining = cell.adjacency;
        if let Some(mv) = came_from {
            remaining = remaining & !Adjacency::from_move(mv.opposite());
        }
        if remaining.is_empty() {
            break;
        }

        let next = remaining
            .moves()
            .next()
            .ok_or(ReadError::InvalidAdjacency { position: current })?;
        current = current.step(next);
        came_from = Some(next);

        steps += 1;
        if steps > limit {
            return Err(ReadError::WalkOverflow { limit });
        }
    }

    Ok(body)
}

/// First food cell in row major order
pub fn find_food(grid: &Grid) -> Result<Position, ReadError> {
    grid.positions_of(SlotKind::Food)
        .next()
        .ok_or(ReadError::FoodNotFound)
}

/// The head is joined to the rest of the body on exactly one side and the
/// snake is moving away from that side.
pub fn head_direction(grid: &Grid) -> Result<Move, ReadError> {
    let head = find_head(grid)?;
    let mask = grid
        .get(head)
        .map(|cell| cell.adjacency)
        .unwrap_or_default();
    mask.single()
        .map(Move::opposite)
        .ok_or(ReadError::HeadingIndeterminate { mask })
}

/// Builds the planner's view of a classified grid
pub fn to_game_state(grid: &Grid) -> Result<GameState, ReadError> {
    let body = snake_shape(grid)?;
    let food = find_food(grid)?;
    let heading = head_direction(grid)?;

    let state = GameState {
        width: grid.width(),
        height: grid.height(),
        body,
        food,
        heading,
    };
    if !state.is_valid() {
        return Err(ReadError::SelfIntersecting);
    }
    Ok(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::vision::Cell;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    /// Builds the grid the classifier would produce for a body given head
    /// first. Each segment is joined to the one before and after it.
    pub(crate) fn grid_for(width: u32, height: u32, body: &[Position], food: Position) -> Grid {
        let mut grid = Grid::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                grid.set(Position::new(x, y), Cell::empty());
            }
        }
        grid.set(food, Cell::food());
        for (i, pos) in body.iter().enumerate() {
            let mut adjacency = Adjacency::NONE;
            let neighbours = [i.checked_sub(1), Some(i + 1)];
            for j in neighbours.iter().flatten() {
                if let Some(other) = body.get(*j) {
                    for mv in Move::all().iter() {
                        if pos.step(*mv) == *other {
                            adjacency |= Adjacency::from_move(*mv);
                        }
                    }
                }
            }
            let kind = if i == 0 { SlotKind::Head } else { SlotKind::Snake };
            grid.set(*pos, Cell::new(kind, adjacency));
        }
        grid
    }

    fn positions(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|(x, y)| Position::new(*x, *y)).collect()
    }

    #[test]
    fn test_reconstructs_bent_snake() {
        let body = positions(&[(1, 1), (2, 1), (2, 2), (3, 2), (4, 2), (4, 1)]);
        let grid = grid_for(8, 5, &body, Position::new(6, 3));
        let state = to_game_state(&grid).unwrap();
        assert_eq!(state.body.iter().copied().collect_vec(), body);
        assert_eq!(state.food, Position::new(6, 3));
        assert_eq!(state.heading, Move::Left);
        assert_eq!((state.width, state.height), (8, 5));
        assert!(state.is_valid());
    }

    #[test]
    fn test_heading_is_away_from_the_neck() {
        let cases = [
            ((2, 2), (2, 3), Move::Up),
            ((2, 2), (2, 1), Move::Down),
            ((2, 2), (3, 2), Move::Left),
            ((2, 2), (1, 2), Move::Right),
        ];
        for (head, neck, heading) in cases.iter() {
            let body = positions(&[*head, *neck]);
            let grid = grid_for(5, 5, &body, Position::new(0, 0));
            assert_eq!(head_direction(&grid), Ok(*heading));
        }
    }

    #[test]
    fn test_single_cell_head_has_no_heading() {
        let mut grid = grid_for(3, 3, &[], Position::new(0, 0));
        grid.set(Position::new(1, 1), Cell::new(SlotKind::Head, Adjacency::NONE));
        assert_eq!(
            snake_shape(&grid).unwrap(),
            VecDeque::from(vec![Position::new(1, 1)])
        );
        assert_eq!(
            head_direction(&grid),
            Err(ReadError::HeadingIndeterminate {
                mask: Adjacency::NONE
            })
        );
    }

    #[test]
    fn test_missing_pieces() {
        let body = positions(&[(0, 0), (1, 0)]);
        let mut no_head = grid_for(3, 3, &body, Position::new(2, 2));
        no_head.set(
            Position::new(0, 0),
            Cell::new(SlotKind::Snake, Adjacency::RIGHT),
        );
        assert_eq!(to_game_state(&no_head), Err(ReadError::HeadNotFound));

        let mut two_heads = grid_for(3, 3, &body, Position::new(2, 2));
        two_heads.set(
            Position::new(1, 0),
            Cell::new(SlotKind::Head, Adjacency::LEFT),
        );
        assert_eq!(
            to_game_state(&two_heads),
            Err(ReadError::MultipleHeads { count: 2 })
        );

        let mut no_food = grid_for(3, 3, &body, Position::new(2, 2));
        no_food.set(Position::new(2, 2), Cell::empty());
        assert_eq!(to_game_state(&no_food), Err(ReadError::FoodNotFound));
    }

    #[test]
    fn test_walk_off_the_snake() {
        let body = positions(&[(0, 0), (1, 0)]);
        let mut grid = grid_for(3, 3, &body, Position::new(2, 2));
        // the tail claims to continue downwards into an empty cell
        grid.set(
            Position::new(1, 0),
            Cell::new(SlotKind::Snake, Adjacency::LEFT | Adjacency::DOWN),
        );
        assert_eq!(
            snake_shape(&grid),
            Err(ReadError::InvalidAdjacency {
                position: Position::new(1, 1)
            })
        );

        // and off the edge of the board
        grid.set(
            Position::new(1, 0),
            Cell::new(SlotKind::Snake, Adjacency::LEFT | Adjacency::UP),
        );
        assert_eq!(
            snake_shape(&grid),
            Err(ReadError::InvalidAdjacency {
                position: Position::new(1, -1)
            })
        );
    }

    #[test]
    fn test_loop_overflows() {
        let mut grid = grid_for(2, 2, &[], Position::new(5, 5));
        grid.set(
            Position::new(0, 0),
            Cell::new(SlotKind::Head, Adjacency::DOWN_RIGHT),
        );
        grid.set(
            Position::new(1, 0),
            Cell::new(SlotKind::Snake, Adjacency::DOWN_LEFT),
        );
        grid.set(
            Position::new(1, 1),
            Cell::new(SlotKind::Snake, Adjacency::UP_LEFT),
        );
        grid.set(
            Position::new(0, 1),
            Cell::new(SlotKind::Snake, Adjacency::UP_RIGHT),
        );
        assert_eq!(
            snake_shape(&grid),
            Err(ReadError::WalkOverflow { limit: 4 })
        );
    }

    #[test]
    fn test_walk_back_into_the_head() {
        // every mask is a legal segment but the neighbours disagree, so the
        // walk circles the block and ends back on the head
        let mut grid = grid_for(3, 3, &[], Position::new(0, 2));
        let cells = [
            ((1, 0), SlotKind::Head, Adjacency::DOWN),
            ((1, 1), SlotKind::Snake, Adjacency::UP_RIGHT),
            ((2, 1), SlotKind::Snake, Adjacency::DOWN_LEFT),
            ((2, 2), SlotKind::Snake, Adjacency::UP_LEFT),
            ((1, 2), SlotKind::Snake, Adjacency::UP_RIGHT),
        ];
        for ((x, y), kind, adjacency) in cells.iter() {
            grid.set(Position::new(*x, *y), Cell::new(*kind, *adjacency));
        }

        let shape = snake_shape(&grid).unwrap();
        assert_eq!(shape.len(), 7);
        assert_eq!(shape.back(), Some(&Position::new(1, 0)));
        assert_eq!(to_game_state(&grid), Err(ReadError::SelfIntersecting));
    }

    /// random self avoiding walk starting at a random cell
    fn random_body(rng: &mut SmallRng, width: i32, height: i32, max_len: usize) -> Vec<Position> {
        let start = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
        let mut body = vec![start];
        while body.len() < max_len {
            let last = body[body.len() - 1];
            let mut moves = Move::all();
            moves.shuffle(&mut *rng);
            let next = moves.iter().map(|mv| last.step(*mv)).find(|p| {
                p.x >= 0 && p.y >= 0 && p.x < width && p.y < height && !body.contains(p)
            });
            match next {
                Some(p) => body.push(p),
                None => break,
            }
        }
        body
    }

    #[test]
    fn test_random_paths_reconstruct() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let body = random_body(&mut rng, 9, 7, 30);
            if body.len() < 2 {
                continue;
            }
            let grid = grid_for(9, 7, &body, Position::new(-1, -1));
            let shape = snake_shape(&grid).unwrap();

            let snake_cells = grid.iter().filter(|(_, c)| c.kind.is_snake()).count();
            assert_eq!(shape.len(), snake_cells);
            assert!(shape
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.manhattan_distance(b) == 1));
            assert_eq!(shape.iter().copied().collect_vec(), body);
        }
    }
}
