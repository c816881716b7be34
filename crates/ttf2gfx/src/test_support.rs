//! Test support utilities for ttf2gfx.
//!
//! This module provides helper types and functions that are useful for testing
//! the trimming and packing stages without a real font, but are not part of the
//! public API.

use std::collections::VecDeque;

use crate::{DenseGrid, FontMetrics, GlyphFrame, GlyphOutline, Rasterizer};

/// A rasterizer that hands out pre-built grids in order.
///
/// Once the queue is exhausted it returns blank grids sized by the glyph frame.
pub struct FixedRasterizer {
    grids: VecDeque<DenseGrid>,
}

impl FixedRasterizer {
    pub fn new(grids: Vec<DenseGrid>) -> Self {
        Self {
            grids: grids.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new(Vec::new())
    }
}

impl Rasterizer for FixedRasterizer {
    fn rasterize(
        &mut self,
        outline: &GlyphOutline,
        metrics: &FontMetrics,
        pixel_height: u32,
    ) -> DenseGrid {
        self.grids.pop_front().unwrap_or_else(|| {
            let frame = GlyphFrame::new(outline, metrics, pixel_height);
            DenseGrid::new(frame.width, frame.height)
        })
    }
}

/// Builds a grid from rows of text, `#` marking set pixels.
///
/// The grid is as wide as the longest row.
pub fn grid_from_ascii(rows: &[&str]) -> DenseGrid {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    DenseGrid::from_fn(width, rows.len(), |x, y| {
        rows[y].chars().nth(x) == Some('#')
    })
}
