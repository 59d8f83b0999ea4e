use thiserror::Error;

use super::Adjacency;
use crate::types::Position;

/// Every way reading a board out of an image can fail. None of these are
/// retried, the frame should be treated as unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// every pixel of the image is fully transparent
    #[error("image has no opaque pixels")]
    EmptyImage,

    /// the accompanying text had no usable `WxH` board size
    #[error("could not parse board dimensions from {text:?}")]
    DimensionParse {
        #[allow(missing_docs)]
        text: String,
    },

    /// the board is bigger (in cells) than the image is in pixels
    #[error("{pixels_wide}x{pixels_high} image cannot hold a {width}x{height} board")]
    ImageTooSmall {
        #[allow(missing_docs)]
        pixels_wide: u32,
        #[allow(missing_docs)]
        pixels_high: u32,
        #[allow(missing_docs)]
        width: u32,
        #[allow(missing_docs)]
        height: u32,
    },

    /// the cells to classify were empty or their rows differ in length
    #[error("cell layout is not a rectangle with at least one cell")]
    CellLayout,

    /// a snake cell connected to no neighbours, or to more than two
    #[error("snake cell at {position} has {count} adjacencies, expected one or two")]
    AdjacencySample {
        #[allow(missing_docs)]
        position: Position,
        #[allow(missing_docs)]
        count: u32,
    },

    #[allow(missing_docs)]
    #[error("could not find the snake head")]
    HeadNotFound,

    /// more than one endpoint was drawn with eyes
    #[error("found {count} snake heads")]
    MultipleHeads {
        #[allow(missing_docs)]
        count: usize,
    },

    /// the walk from the head led somewhere that is not snake
    #[error("adjacency at {position} does not lead to a snake cell")]
    InvalidAdjacency {
        #[allow(missing_docs)]
        position: Position,
    },

    /// the walk took more steps than there are cells, the body loops
    #[error("snake walk exceeded {limit} steps, the body loops")]
    WalkOverflow {
        #[allow(missing_docs)]
        limit: usize,
    },

    /// the walk ended but passed through some cell twice
    #[error("reconstructed snake crosses itself")]
    SelfIntersecting,

    #[allow(missing_docs)]
    #[error("could not find food")]
    FoodNotFound,

    /// the head is not a path endpoint so it is not facing anywhere
    #[error("head adjacency {mask:?} does not determine a heading")]
    HeadingIndeterminate {
        #[allow(missing_docs)]
        mask: Adjacency,
    },
}
