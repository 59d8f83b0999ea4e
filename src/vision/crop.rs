use image::{GenericImageView, Rgba};

use super::ReadError;

/// A rectangle of pixels inside an image, in that image's coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    #[allow(missing_docs)]
    pub x: u32,
    #[allow(missing_docs)]
    pub y: u32,
    #[allow(missing_docs)]
    pub width: u32,
    #[allow(missing_docs)]
    pub height: u32,
}

impl Rect {
    /// the whole of an image
    pub fn of_image<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// exclusive right edge
    pub fn max_x(&self) -> u32 {
        self.x + self.width
    }

    /// exclusive bottom edge
    pub fn max_y(&self) -> u32 {
        self.y + self.height
    }

    /// geometric center, rounded towards the top left
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

fn is_opaque(pixel: Rgba<u8>) -> bool {
    pixel.0[3] != 0
}

/// Strips the transparent margin the game renders around the board.
///
/// The top left corner is the first opaque pixel scanning forwards in row
/// major order, the bottom right corner is the first opaque pixel scanning
/// backwards. Only those two pixels bound the result, so the image is assumed
/// to be a solid rectangle surrounded by transparency.
pub fn autocrop<I>(image: &I) -> Result<Rect, ReadError>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();

    let first = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .find(|&(x, y)| is_opaque(image.get_pixel(x, y)));
    let (min_x, min_y) = first.ok_or(ReadError::EmptyImage)?;

    let last = (0..height)
        .rev()
        .flat_map(|y| (0..width).rev().map(move |x| (x, y)))
        .find(|&(x, y)| is_opaque(image.get_pixel(x, y)));
    let (max_x, max_y) = last.ok_or(ReadError::EmptyImage)?;

    // a non rectangular blob can put the last pixel left of the first one
    let (min_x, max_x) = (min_x.min(max_x), min_x.max(max_x));

    Ok(Rect {
        x: min_x,
        y: min_y,
        width: max_x + 1 - min_x,
        height: max_y + 1 - min_y,
    })
}
