//! Outline to coverage grid conversion.
//!
//! Rasterizers are interchangeable: anything that turns a [`GlyphOutline`] into a
//! [`DenseGrid`] of the size described by [`GlyphFrame`] can back the pipeline.
//! [`ZenoRasterizer`] is the software scan-converter used by default.
use zeno::{Command, Format, Mask, Origin, Scratch, Vector};

use crate::{
    grid::DenseGrid,
    outline::{round_half_up, FontMetrics, GlyphOutline},
};

/// Pixel geometry of one glyph cell at a given pixel height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphFrame {
    /// Font units to pixels.
    pub scale: f64,
    /// `ceil(advance * scale)`
    pub width: usize,
    /// `ceil((ascender - descender) * scale)`
    pub height: usize,
    /// Row of the baseline, counted from the top: `round(ascender * scale)`.
    pub baseline: i32,
    /// Unrounded advance in pixels.
    pub advance: f64,
}

impl GlyphFrame {
    pub fn new(outline: &GlyphOutline, metrics: &FontMetrics, pixel_height: u32) -> Self {
        let scale = metrics.scale(pixel_height);
        let advance = outline.advance_width as f64 * scale;
        let extent = (metrics.ascender as f64 - metrics.descender as f64) * scale;
        Self {
            scale,
            width: advance.ceil().max(0.0) as usize,
            height: extent.ceil().max(0.0) as usize,
            baseline: round_half_up(metrics.ascender as f64 * scale),
            advance,
        }
    }
}

/// Scan-converts a glyph outline into a [`DenseGrid`].
///
/// Implementations must return a grid of exactly `GlyphFrame::width` by
/// `GlyphFrame::height` cells, with the outline's baseline on row
/// `GlyphFrame::baseline` and a pixel set when its coverage exceeds 50%.
pub trait Rasterizer {
    fn rasterize(
        &mut self,
        outline: &GlyphOutline,
        metrics: &FontMetrics,
        pixel_height: u32,
    ) -> DenseGrid;
}

impl<F> Rasterizer for F
where
    F: FnMut(&GlyphOutline, &FontMetrics, u32) -> DenseGrid,
{
    fn rasterize(
        &mut self,
        outline: &GlyphOutline,
        metrics: &FontMetrics,
        pixel_height: u32,
    ) -> DenseGrid {
        self(outline, metrics, pixel_height)
    }
}

/// Software rasterizer backed by zeno's alpha masks.
#[derive(Default)]
pub struct ZenoRasterizer {
    scratch: Scratch,
}

impl ZenoRasterizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rasterizer for ZenoRasterizer {
    fn rasterize(
        &mut self,
        outline: &GlyphOutline,
        metrics: &FontMetrics,
        pixel_height: u32,
    ) -> DenseGrid {
        let frame = GlyphFrame::new(outline, metrics, pixel_height);
        if frame.width == 0 || frame.height == 0 || outline.is_empty() {
            return DenseGrid::new(frame.width, frame.height);
        }
        let path = to_pixel_space(outline.commands(), frame.scale as f32, frame.baseline as f32);
        let (alpha, _) = Mask::with_scratch(&path[..], &mut self.scratch)
            .format(Format::Alpha)
            .origin(Origin::TopLeft)
            .size(frame.width as u32, frame.height as u32)
            .render();
        DenseGrid::from_alpha(frame.width, frame.height, &alpha)
    }
}

/// Scales font-unit commands to pixels and flips y so the baseline lands on `baseline`.
fn to_pixel_space(commands: &[Command], scale: f32, baseline: f32) -> Vec<Command> {
    let map = |v: Vector| Vector::new(v.x * scale, baseline - v.y * scale);
    commands
        .iter()
        .map(|cmd| match *cmd {
            Command::MoveTo(p) => Command::MoveTo(map(p)),
            Command::LineTo(p) => Command::LineTo(map(p)),
            Command::QuadTo(c, p) => Command::QuadTo(map(c), map(p)),
            Command::CurveTo(c0, c1, p) => Command::CurveTo(map(c0), map(c1), map(p)),
            Command::Close => Command::Close,
        })
        .collect()
}
