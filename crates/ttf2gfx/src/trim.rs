//! Content-bound cropping of a coverage grid into a row-packed glyph bitmap.
use crate::{grid::DenseGrid, outline::round_half_up};

/// A cropped, row-packed monochrome glyph.
///
/// Rows are `ceil(width / 8)` bytes wide, most significant bit first. Only rows
/// are dropped by trimming; the row stride keeps the original grid width, and
/// the content is shifted left by `x_offset` columns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrimmedGlyph {
    pub bitmap: Vec<u8>,
    /// Width of the source grid.
    pub width: usize,
    /// Rows kept after trimming, at least one.
    pub height: usize,
    /// Columns removed from the left.
    pub x_offset: i32,
    /// Distance from the baseline up to the first kept row, minus one.
    pub y_offset: i32,
    pub x_advance: i32,
}

impl TrimmedGlyph {
    pub fn bytes_per_row(&self) -> usize {
        bytes_per_row(self.width)
    }

    /// Whether the pixel at trimmed coordinates `(x, y)` is set.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.bitmap[y * self.bytes_per_row() + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Maps the trimmed pixels back onto the source grid using the stored offsets.
    ///
    /// `baseline` must be the row the glyph was trimmed with.
    pub fn expand(&self, grid_height: usize, baseline: i32) -> DenseGrid {
        let top = baseline - self.y_offset - 1;
        DenseGrid::from_fn(self.width, grid_height, |x, y| {
            let tx = x as i64 - self.x_offset as i64;
            let ty = y as i64 - top as i64;
            tx >= 0 && ty >= 0 && self.pixel(tx as usize, ty as usize)
        })
    }
}

pub fn bytes_per_row(width: usize) -> usize {
    width.div_ceil(8)
}

/// Crops `grid` to its set pixels and packs the result.
///
/// A grid without set pixels keeps a single blank row at the origin, so the
/// offsets of space-like glyphs stay well defined.
pub fn trim(grid: &DenseGrid, baseline: i32, advance: f64) -> TrimmedGlyph {
    let (min_x, max_x, min_y, max_y) = content_box(grid).unwrap_or((0, 0, 0, 0));

    let width = grid.width();
    let height = max_y - min_y + 1;
    let stride = bytes_per_row(width);
    let mut bitmap = vec![0u8; stride * height];

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if grid.get(x, y) {
                let (tx, ty) = (x - min_x, y - min_y);
                bitmap[ty * stride + tx / 8] |= 0x80 >> (tx % 8);
            }
        }
    }

    log::trace!(
        "trimmed {}x{} grid to rows {min_y}..={max_y}, columns {min_x}..={max_x}",
        grid.width(),
        grid.height()
    );

    TrimmedGlyph {
        bitmap,
        width,
        height,
        x_offset: min_x as i32,
        y_offset: baseline - min_y as i32 - 1,
        x_advance: round_half_up(advance),
    }
}

/// Inclusive `(min_x, max_x, min_y, max_y)` of the set pixels, `None` when blank.
fn content_box(grid: &DenseGrid) -> Option<(usize, usize, usize, usize)> {
    grid.set_pixels().fold(None, |acc, (x, y)| match acc {
        None => Some((x, x, y, y)),
        Some((x0, x1, y0, y1)) => Some((x0.min(x), x1.max(x), y0.min(y), y1.max(y))),
    })
}
