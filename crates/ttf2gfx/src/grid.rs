//! Dense 1-bit coverage grid produced by a rasterizer.

/// Alpha values strictly above this count as a set pixel (more than 50% coverage).
pub const ALPHA_THRESHOLD: u8 = 127;

/// Row-major coverage grid, one entry per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl DenseGrid {
    /// Creates an empty (all clear) grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Thresholds an 8-bit alpha mask. Missing trailing bytes read as zero coverage.
    pub fn from_alpha(width: usize, height: usize, alpha: &[u8]) -> Self {
        Self::from_fn(width, height, |x, y| {
            alpha
                .get(y * width + x)
                .is_some_and(|a| *a > ALPHA_THRESHOLD)
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the pixel at `(x, y)` is set. Out of range reads are clear.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    /// Iterates over the coordinates of all set pixels in row-major order.
    pub fn set_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn is_blank(&self) -> bool {
        !self.cells.iter().any(|c| *c)
    }
}
