//! Assembly of trimmed glyphs and font metadata into a [`FontPack`].
use std::collections::BTreeMap;

use crate::{
    outline::{FontMetrics, GlyphOutline},
    raster::{GlyphFrame, Rasterizer},
    trim::{trim, TrimmedGlyph},
};

/// Resolution carried in the pack metadata. Not used when packing.
pub const DEFAULT_RESOLUTION: u32 = 72;
/// Code point substituted for missing characters by consumers.
pub const DEFAULT_CHAR: u32 = 0x20;
pub const UNKNOWN_FAMILY: &str = "Unknown Font";

/// Descriptive data about the source font.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontInfo {
    pub family: String,
    pub version: Option<String>,
    pub metrics: FontMetrics,
}

/// Largest glyph width and trimmed height in a pack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    pub fn include(self, glyph: &TrimmedGlyph) -> Self {
        Self {
            width: self.width.max(glyph.width),
            height: self.height.max(glyph.height),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSize {
    pub points: u32,
    pub resolution_x: u32,
    pub resolution_y: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontPackMeta {
    pub name: String,
    pub version: Option<String>,
    pub size: FontSize,
    /// Ascent in pixels above the baseline.
    pub ascent: i32,
    /// Descent in pixels, negative below the baseline.
    pub descent: i32,
    pub default_char: u32,
    pub total_chars: usize,
    pub bounds: Bounds,
}

/// Trimmed glyphs keyed by code point, plus font metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontPack {
    pub meta: FontPackMeta,
    pub glyphs: BTreeMap<u32, TrimmedGlyph>,
}

impl FontPack {
    pub fn glyph(&self, code: u32) -> Option<&TrimmedGlyph> {
        self.glyphs.get(&code)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

/// Rasterizes and trims every glyph, folding the running bounds alongside.
pub fn trim_glyphs<'a, R: Rasterizer>(
    glyphs: impl IntoIterator<Item = &'a (u32, GlyphOutline)>,
    metrics: &FontMetrics,
    pixel_height: u32,
    rasterizer: &mut R,
) -> (BTreeMap<u32, TrimmedGlyph>, Bounds) {
    glyphs.into_iter().fold(
        (BTreeMap::new(), Bounds::default()),
        |(mut map, bounds), (code, outline)| {
            let frame = GlyphFrame::new(outline, metrics, pixel_height);
            let grid = rasterizer.rasterize(outline, metrics, pixel_height);
            let glyph = trim(&grid, frame.baseline, frame.advance);
            let bounds = bounds.include(&glyph);
            map.insert(*code, glyph);
            (map, bounds)
        },
    )
}

/// Builds a [`FontPack`] from the glyph outlines of one font.
pub fn assemble<R: Rasterizer>(
    glyphs: &[(u32, GlyphOutline)],
    info: &FontInfo,
    pixel_height: u32,
    rasterizer: &mut R,
) -> FontPack {
    let metrics = &info.metrics;
    let (glyphs_map, bounds) = trim_glyphs(glyphs, metrics, pixel_height, rasterizer);
    log::debug!(
        "assembled {} glyphs of '{}' at {pixel_height}px, bounds {}x{}",
        glyphs_map.len(),
        info.family,
        bounds.width,
        bounds.height
    );
    let name = if info.family.is_empty() {
        UNKNOWN_FAMILY.to_string()
    } else {
        info.family.clone()
    };
    FontPack {
        meta: FontPackMeta {
            name,
            version: info.version.clone(),
            size: FontSize {
                points: pixel_height,
                resolution_x: DEFAULT_RESOLUTION,
                resolution_y: DEFAULT_RESOLUTION,
            },
            ascent: metrics.ascent_px(pixel_height),
            descent: metrics.descent_px(pixel_height),
            default_char: DEFAULT_CHAR,
            total_chars: glyphs.len(),
            bounds,
        },
        glyphs: glyphs_map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::DenseGrid, test_support::FixedRasterizer};
    use pretty_assertions::assert_eq;

    fn info() -> FontInfo {
        FontInfo {
            family: "Pixel".into(),
            version: Some("Version 1.000".into()),
            metrics: FontMetrics {
                units_per_em: 1000,
                ascender: 750,
                descender: -250,
            },
        }
    }

    #[test]
    fn bounds_fold_over_all_glyphs() {
        let mut tall = DenseGrid::new(8, 12);
        tall.set(1, 2, true);
        tall.set(1, 9, true);
        let mut wide = DenseGrid::new(6, 12);
        wide.set(0, 4, true);
        wide.set(5, 4, true);

        let mut raster = FixedRasterizer::new(vec![tall, wide]);
        let glyphs = vec![
            (0x41, GlyphOutline::new(500.0)),
            (0x42, GlyphOutline::new(500.0)),
        ];
        let pack = assemble(&glyphs, &info(), 12, &mut raster);

        assert_eq!(pack.meta.bounds, Bounds { width: 8, height: 8 });
        assert_eq!(pack.meta.total_chars, 2);
        assert_eq!(pack.glyph(0x42).map(|g| g.height), Some(1));
    }

    #[test]
    fn metadata_from_font_info() {
        let mut raster = FixedRasterizer::blank();
        let glyphs = vec![(0x20, GlyphOutline::new(250.0))];
        let pack = assemble(&glyphs, &info(), 12, &mut raster);
        let meta = &pack.meta;
        assert_eq!(meta.name, "Pixel");
        assert_eq!(meta.version.as_deref(), Some("Version 1.000"));
        assert_eq!(meta.size.points, 12);
        assert_eq!(meta.size.resolution_x, 72);
        assert_eq!(meta.ascent, 9);
        assert_eq!(meta.descent, -3);
        assert_eq!(meta.default_char, 0x20);
    }

    #[test]
    fn uses_frame_baseline_and_advance() {
        let mut grid = DenseGrid::new(8, 12);
        grid.set(2, 4, true);
        let mut raster = FixedRasterizer::new(vec![grid]);
        let glyphs = vec![(0x2E, GlyphOutline::new(600.0))];
        let pack = assemble(&glyphs, &info(), 12, &mut raster);
        let glyph = pack.glyph(0x2E).expect("glyph present");
        // baseline round(750 * 0.012) = 9
        assert_eq!(glyph.y_offset, 9 - 4 - 1);
        assert_eq!(glyph.x_advance, 7);
    }

    #[test]
    fn empty_family_falls_back() {
        let mut raster = FixedRasterizer::blank();
        let info = FontInfo {
            family: String::new(),
            ..info()
        };
        let pack = assemble(&[], &info, 12, &mut raster);
        assert_eq!(pack.meta.name, UNKNOWN_FAMILY);
        assert_eq!(pack.glyph_count(), 0);
        assert_eq!(pack.meta.bounds, Bounds::default());
    }
}
