//! Turning a screenshot of the board back into a [`GameState`]
//!
//! Reading happens in stages, each of which can be used on its own:
//! [`autocrop`] finds the board inside the image, [`split_cells`] cuts it
//! into one rectangle per cell, [`classify_grid`] decides what each cell
//! holds and [`to_game_state`] walks the snake from its head to its tail.
use image::{GenericImageView, Rgba};
use tracing::{debug, instrument};

use crate::game::GameState;

mod classify;
mod color;
mod crop;
mod error;
mod grid;
mod reconstruct;
mod split;

pub use classify::{classify_cell, classify_grid, sample_adjacency, sample_eyes, sample_slot};
pub use color::{Palette, Rgb, DEFAULT_TOLERANCE};
pub use crop::{autocrop, Rect};
pub use error::ReadError;
pub use grid::{Adjacency, Cell, Grid, SlotKind};
pub use reconstruct::{find_food, find_head, head_direction, snake_shape, to_game_state};
pub use split::{split_cells, BoardDimensions};

/// A fully read board. The grid is kept around for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// what every cell looked like
    pub grid: Grid,
    #[allow(missing_docs)]
    pub state: GameState,
}

/// Runs every reading stage over `image`. `alt_text` must contain the board
/// size as `<width>x<height>`.
#[instrument(level = "trace", skip_all)]
pub fn read_board<I>(image: &I, alt_text: &str, palette: &Palette) -> Result<Board, ReadError>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let bounds = autocrop(image)?;
    let dims = BoardDimensions::parse(alt_text)?;
    debug!(?bounds, width = dims.width, height = dims.height, "cropped board");

    let cells = split_cells(bounds, dims)?;
    let grid = classify_grid(image, &cells, palette)?;
    let state = to_game_state(&grid)?;
    debug!(length = state.body.len(), head = %state.head(), heading = %state.heading, "read board");

    Ok(Board { grid, state })
}
