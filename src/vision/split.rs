use super::{ReadError, Rect};

/// Board size in cells, as announced in the image description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardDimensions {
    #[allow(missing_docs)]
    pub width: u32,
    #[allow(missing_docs)]
    pub height: u32,
}

impl BoardDimensions {
    /// Finds the first `<digits>x<digits>` in `text`. Both sides must be non
    /// zero and fit in a u32.
    pub fn parse(text: &str) -> Result<Self, ReadError> {
        let bytes = text.as_bytes();
        let digits_from = |start: usize| {
            bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
        };

        for (i, b) in bytes.iter().enumerate() {
            if *b != b'x' || i == 0 || !bytes[i - 1].is_ascii_digit() {
                continue;
            }
            let height_len = digits_from(i + 1);
            if height_len == 0 {
                continue;
            }
            let width_start = bytes[..i]
                .iter()
                .rposition(|b| !b.is_ascii_digit())
                .map_or(0, |p| p + 1);

            let parsed = text[width_start..i]
                .parse::<u32>()
                .and_then(|w| text[i + 1..i + 1 + height_len].parse::<u32>().map(|h| (w, h)));
            return match parsed {
                Ok((width, height)) if width > 0 && height > 0 => {
                    Ok(BoardDimensions { width, height })
                }
                _ => Err(ReadError::DimensionParse {
                    text: text.to_string(),
                }),
            };
        }

        Err(ReadError::DimensionParse {
            text: text.to_string(),
        })
    }
}

/// Cuts `board` into `width x height` cells. Cell edges are
/// `floor(i * pixels / cells)` so when the size does not divide evenly some
/// cells are one pixel larger than others. Returned row major, `cells[y][x]`.
pub fn split_cells(board: Rect, dims: BoardDimensions) -> Result<Vec<Vec<Rect>>, ReadError> {
    if board.width < dims.width || board.height < dims.height {
        return Err(ReadError::ImageTooSmall {
            pixels_wide: board.width,
            pixels_high: board.height,
            width: dims.width,
            height: dims.height,
        });
    }

    let edge = |i: u32, pixels: u32, cells: u32| {
        (u64::from(i) * u64::from(pixels) / u64::from(cells)) as u32
    };

    let rows = (0..dims.height)
        .map(|y| {
            let min_y = edge(y, board.height, dims.height);
            let max_y = edge(y + 1, board.height, dims.height);
            (0..dims.width)
                .map(|x| {
                    let min_x = edge(x, board.width, dims.width);
                    let max_x = edge(x + 1, board.width, dims.width);
                    Rect {
                        x: board.x + min_x,
                        y: board.y + min_y,
                        width: max_x - min_x,
                        height: max_y - min_y,
                    }
                })
                .collect()
        })
        .collect();
    Ok(rows)
}
