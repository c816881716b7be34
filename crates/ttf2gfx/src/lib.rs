//! ttf2gfx: outline fonts to Adafruit GFX bitmap fonts.
//!
//! Pipeline: [`OutlineFont`] -> [`Rasterizer`] -> [`trim`] -> [`FontPack`] ->
//! [`gfx::encode`] -> [`header`].

pub mod convert;
mod error;
mod font;
pub mod gfx;
mod grid;
pub mod header;
mod outline;
pub mod pack;
pub mod preview;
pub mod raster;
mod trim;
#[cfg(feature = "woff")]
pub mod woff;

pub use convert::{convert, convert_with, ConvertOptions, Output, OutputMode, DEFAULT_PIXEL_HEIGHT};
pub use error::{FontError, Result};
pub use font::{Container, OutlineFont};
pub use gfx::{encode, EncodeOptions, EncodedFont, GfxGlyph, RowLayout};
pub use grid::DenseGrid;
pub use header::HeaderFile;
pub use outline::{FontMetrics, GlyphOutline};
pub use pack::{assemble, Bounds, FontInfo, FontPack, FontPackMeta};
pub use raster::{GlyphFrame, Rasterizer, ZenoRasterizer};
pub use trim::{trim, TrimmedGlyph};

// Test utilities
pub mod test_support;

/// Inclusive block of code points. `first > last` denotes an empty block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeRange {
    pub first: u32,
    pub last: u32,
}

impl CodeRange {
    /// Printable ASCII, space through tilde.
    pub const ASCII: CodeRange = CodeRange::new(0x20, 0x7E);

    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.first..=self.last
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, code: u32) -> bool {
        (self.first..=self.last).contains(&code)
    }
}

impl Default for CodeRange {
    fn default() -> Self {
        Self::ASCII
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_block() {
        assert_eq!(CodeRange::ASCII.len(), 95);
        assert!(CodeRange::ASCII.contains(0x7E));
        assert!(!CodeRange::ASCII.contains(0x1F));
    }

    #[test]
    fn reversed_range_is_empty() {
        let range = CodeRange::new(0x41, 0x40);
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
    }
}
