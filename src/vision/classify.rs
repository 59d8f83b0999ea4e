use image::{GenericImageView, Rgba};
use tracing::trace;

use super::{Adjacency, Cell, Grid, Palette, ReadError, Rect, Rgb, SlotKind};
use crate::types::Position;

fn sample<I>(image: &I, x: u32, y: u32) -> Rgb
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    Rgb::from(image.get_pixel(x, y))
}

/// Snake, food or empty, from the pixel in the middle of the cell
pub fn sample_slot<I>(image: &I, cell: Rect, palette: &Palette) -> SlotKind
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (x, y) = cell.center();
    let color = sample(image, x, y);
    if palette.is_snake(&color) {
        SlotKind::Snake
    } else if palette.is_food(&color) {
        SlotKind::Food
    } else {
        SlotKind::Empty
    }
}

/// Segments are drawn reaching the edge of the cell wherever they join a
/// neighbour, so the midpoint of each edge tells us which sides connect.
/// The returned mask is unchecked.
pub fn sample_adjacency<I>(image: &I, cell: Rect, palette: &Palette) -> Adjacency
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (mid_x, mid_y) = cell.center();
    let midpoints = [
        (Adjacency::UP, mid_x, cell.y),
        (Adjacency::DOWN, mid_x, cell.max_y() - 1),
        (Adjacency::LEFT, cell.x, mid_y),
        (Adjacency::RIGHT, cell.max_x() - 1, mid_y),
    ];

    let mut adjacency = Adjacency::NONE;
    for (edge, x, y) in midpoints.iter() {
        if palette.is_snake(&sample(image, *x, *y)) {
            adjacency |= *edge;
        }
    }
    adjacency
}

/// Looks for the eyes along the top-left to bottom-right diagonal. Only the
/// head is drawn with eyes.
pub fn sample_eyes<I>(image: &I, cell: Rect, palette: &Palette) -> bool
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let span = cell.width.min(cell.height);
    (0..span).any(|i| palette.is_eye(&sample(image, cell.x + i, cell.y + i)))
}

/// Classifies a single cell. `position` is only used for error reporting.
pub fn classify_cell<I>(
    image: &I,
    cell: Rect,
    position: Position,
    palette: &Palette,
) -> Result<Cell, ReadError>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let kind = sample_slot(image, cell, palette);
    if kind != SlotKind::Snake {
        return Ok(Cell::new(kind, Adjacency::NONE));
    }

    let adjacency = sample_adjacency(image, cell, palette);
    if !adjacency.is_valid_segment() {
        return Err(ReadError::AdjacencySample {
            position,
            count: adjacency.count(),
        });
    }

    // both ends of the body have one neighbour, the head is the one with eyes
    if adjacency.count() == 1 && sample_eyes(image, cell, palette) {
        trace!(%position, "found eyes");
        return Ok(Cell::new(SlotKind::Head, adjacency));
    }
    Ok(Cell::new(SlotKind::Snake, adjacency))
}

/// Classifies every cell produced by [`super::split_cells`]. `cells` must
/// be rectangular, `cells[y][x]`, with at least one cell.
pub fn classify_grid<I>(
    image: &I,
    cells: &[Vec<Rect>],
    palette: &Palette,
) -> Result<Grid, ReadError>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let width = cells.first().map_or(0, Vec::len);
    if width == 0 || cells.iter().any(|row| row.len() != width) {
        return Err(ReadError::CellLayout);
    }
    let mut grid = Grid::new(width as u32, cells.len() as u32);

    for (y, row) in cells.iter().enumerate() {
        for (x, rect) in row.iter().enumerate() {
            let position = Position::new(x as i32, y as i32);
            grid.set(position, classify_cell(image, *rect, position, palette)?);
        }
    }
    Ok(grid)
}
