use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::types::{Move, Position};

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// not classified yet
    Undefined,
    #[allow(missing_docs)]
    Empty,
    /// body segment, including the tail
    Snake,
    #[allow(missing_docs)]
    Food,
    #[allow(missing_docs)]
    Head,
}

impl Default for SlotKind {
    fn default() -> Self {
        SlotKind::Undefined
    }
}

impl SlotKind {
    /// head or body
    pub fn is_snake(self) -> bool {
        matches!(self, SlotKind::Snake | SlotKind::Head)
    }
}

/// Which edges of a cell join onto another snake segment
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Adjacency(u8);

impl Adjacency {
    #[allow(missing_docs)]
    pub const NONE: Adjacency = Adjacency(0);
    #[allow(missing_docs)]
    pub const UP: Adjacency = Adjacency(0b0001);
    #[allow(missing_docs)]
    pub const DOWN: Adjacency = Adjacency(0b0010);
    #[allow(missing_docs)]
    pub const LEFT: Adjacency = Adjacency(0b0100);
    #[allow(missing_docs)]
    pub const RIGHT: Adjacency = Adjacency(0b1000);

    /// vertical straight
    pub const UP_DOWN: Adjacency = Adjacency(0b0011);
    /// horizontal straight
    pub const LEFT_RIGHT: Adjacency = Adjacency(0b1100);
    #[allow(missing_docs)]
    pub const UP_LEFT: Adjacency = Adjacency(0b0101);
    #[allow(missing_docs)]
    pub const UP_RIGHT: Adjacency = Adjacency(0b1001);
    #[allow(missing_docs)]
    pub const DOWN_LEFT: Adjacency = Adjacency(0b0110);
    #[allow(missing_docs)]
    pub const DOWN_RIGHT: Adjacency = Adjacency(0b1010);

    /// order the reconstruction walk prefers edges in
    pub const WALK_ORDER: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

    /// the single edge facing `mv`
    pub const fn from_move(mv: Move) -> Adjacency {
        match mv {
            Move::Up => Self::UP,
            Move::Down => Self::DOWN,
            Move::Left => Self::LEFT,
            Move::Right => Self::RIGHT,
        }
    }

    /// builds a mask from raw bits, anything above the low four is dropped
    pub const fn from_bits(bits: u8) -> Adjacency {
        Adjacency(bits & 0b1111)
    }

    #[allow(missing_docs)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// number of connected edges
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[allow(missing_docs)]
    pub const fn contains(self, other: Adjacency) -> bool {
        self.0 & other.0 == other.0
    }

    /// the direction of the only connected edge, if exactly one is set
    pub fn single(self) -> Option<Move> {
        match self {
            Self::UP => Some(Move::Up),
            Self::DOWN => Some(Move::Down),
            Self::LEFT => Some(Move::Left),
            Self::RIGHT => Some(Move::Right),
            _ => None,
        }
    }

    /// connected edges, in walk order
    pub fn moves(self) -> impl Iterator<Item = Move> {
        Self::WALK_ORDER
            .iter()
            .copied()
            .filter(move |mv| self.contains(Self::from_move(*mv)))
    }

    /// a snake segment joins one neighbour (an end) or two
    pub const fn is_valid_segment(self) -> bool {
        matches!(self.count(), 1 | 2)
    }
}

impl BitOr for Adjacency {
    type Output = Adjacency;

    fn bitor(self, rhs: Adjacency) -> Adjacency {
        Adjacency(self.0 | rhs.0)
    }
}

impl BitOrAssign for Adjacency {
    fn bitor_assign(&mut self, rhs: Adjacency) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Adjacency {
    type Output = Adjacency;

    fn bitand(self, rhs: Adjacency) -> Adjacency {
        Adjacency(self.0 & rhs.0)
    }
}

impl Not for Adjacency {
    type Output = Adjacency;

    fn not(self) -> Adjacency {
        Adjacency(!self.0 & 0b1111)
    }
}

impl fmt::Debug for Adjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Adjacency(none)");
        }
        let names: Vec<String> = Move::all()
            .iter()
            .filter(|mv| self.contains(Self::from_move(**mv)))
            .map(|mv| mv.to_string())
            .collect();
        write!(f, "Adjacency({})", names.join("|"))
    }
}

/// The classification of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    #[allow(missing_docs)]
    pub kind: SlotKind,
    /// only meaningful for snake and head cells
    pub adjacency: Adjacency,
}

impl Cell {
    #[allow(missing_docs)]
    pub const fn new(kind: SlotKind, adjacency: Adjacency) -> Self {
        Cell { kind, adjacency }
    }

    #[allow(missing_docs)]
    pub const fn empty() -> Self {
        Cell::new(SlotKind::Empty, Adjacency::NONE)
    }

    #[allow(missing_docs)]
    pub const fn food() -> Self {
        Cell::new(SlotKind::Food, Adjacency::NONE)
    }
}

/// Classified board, row major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// a grid of `Undefined` cells. Both dimensions must be at least one.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        Grid {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[allow(missing_docs)]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// the cell at `pos`, `None` off the board
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// overwrites a cell. Positions off the board are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// all cells with their positions, row major
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (
                Position::new((i % width) as i32, (i / width) as i32),
                cell,
            )
        })
    }

    /// positions of every cell of the given kind, row major
    pub fn positions_of(&self, kind: SlotKind) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(move |(_, cell)| cell.kind == kind)
            .map(|(pos, _)| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_masks() {
        assert_eq!(Adjacency::UP | Adjacency::DOWN, Adjacency::UP_DOWN);
        assert_eq!(Adjacency::LEFT | Adjacency::RIGHT, Adjacency::LEFT_RIGHT);
        assert_eq!(Adjacency::DOWN | Adjacency::LEFT, Adjacency::DOWN_LEFT);

        let two_bit = [
            Adjacency::UP_DOWN,
            Adjacency::LEFT_RIGHT,
            Adjacency::UP_LEFT,
            Adjacency::UP_RIGHT,
            Adjacency::DOWN_LEFT,
            Adjacency::DOWN_RIGHT,
        ];
        assert!(two_bit.iter().all(|a| a.count() == 2 && a.is_valid_segment()));

        let valid = (0u8..16)
            .map(Adjacency::from_bits)
            .filter(|a| a.is_valid_segment())
            .count();
        assert_eq!(valid, 10);
        assert!(!Adjacency::NONE.is_valid_segment());
        assert!(!(Adjacency::UP_DOWN | Adjacency::LEFT).is_valid_segment());
    }

    #[test]
    fn test_single_and_moves() {
        assert_eq!(Adjacency::LEFT.single(), Some(Move::Left));
        assert_eq!(Adjacency::UP_LEFT.single(), None);
        assert_eq!(
            Adjacency::UP_LEFT.moves().collect::<Vec<_>>(),
            vec![Move::Up, Move::Left]
        );
        assert_eq!(!Adjacency::UP & Adjacency::UP_LEFT, Adjacency::LEFT);
        assert_eq!(format!("{:?}", Adjacency::DOWN_RIGHT), "Adjacency(down|right)");
    }

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(3, 2);
        grid.set(Position::new(2, 1), Cell::food());
        grid.set(Position::new(5, 5), Cell::food());
        assert_eq!(grid.get(Position::new(2, 1)), Some(&Cell::food()));
        assert_eq!(grid.get(Position::new(3, 0)), None);
        assert_eq!(grid.get(Position::new(0, -1)), None);
        assert_eq!(
            grid.positions_of(SlotKind::Food).collect::<Vec<_>>(),
            vec![Position::new(2, 1)]
        );
        assert_eq!(grid.positions_of(SlotKind::Undefined).count(), 5);
    }
}
