//! Unscaled glyph outlines and the font-wide metrics needed to place them.
use skrifa::outline::OutlinePen;
use zeno::{Command, Vector};

/// Font-wide vertical metrics in font units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    pub units_per_em: u16,
    /// hhea ascender, positive above the baseline.
    pub ascender: i16,
    /// hhea descender, usually negative.
    pub descender: i16,
}

impl FontMetrics {
    /// Scale factor from font units to pixels.
    pub fn scale(&self, pixel_height: u32) -> f64 {
        if self.units_per_em == 0 {
            return 0.0;
        }
        pixel_height as f64 / self.units_per_em as f64
    }

    /// Ascent rounded to whole pixels.
    pub fn ascent_px(&self, pixel_height: u32) -> i32 {
        round_half_up(self.ascender as f64 * self.scale(pixel_height))
    }

    /// Descent rounded to whole pixels (negative below the baseline).
    pub fn descent_px(&self, pixel_height: u32) -> i32 {
        round_half_up(self.descender as f64 * self.scale(pixel_height))
    }
}

/// Rounds halves toward positive infinity, so `-2.5` becomes `-2`.
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// A glyph outline in font units (y up), plus its horizontal advance.
#[derive(Clone, Debug, Default)]
pub struct GlyphOutline {
    pub advance_width: f32,
    pub name: Option<String>,
    commands: Vec<Command>,
    open: bool,
}

impl GlyphOutline {
    pub fn new(advance_width: f32) -> Self {
        Self {
            advance_width,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Closes a trailing open contour.
    pub fn finish(&mut self) {
        if self.open {
            self.commands.push(Command::Close);
            self.open = false;
        }
    }
}

impl OutlinePen for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish();
        self.commands.push(Command::MoveTo(Vector::new(x, y)));
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(Command::LineTo(Vector::new(x, y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.commands
            .push(Command::QuadTo(Vector::new(cx0, cy0), Vector::new(x, y)));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(Command::CurveTo(
            Vector::new(cx0, cy0),
            Vector::new(cx1, cy1),
            Vector::new(x, y),
        ));
    }

    fn close(&mut self) {
        if self.open {
            self.commands.push(Command::Close);
            self.open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_closes_open_contours() {
        let mut outline = GlyphOutline::new(500.0);
        outline.move_to(0.0, 0.0);
        outline.line_to(10.0, 0.0);
        outline.move_to(20.0, 0.0);
        outline.line_to(30.0, 0.0);
        outline.finish();
        let closes = outline
            .commands()
            .iter()
            .filter(|c| matches!(c, Command::Close))
            .count();
        assert_eq!(closes, 2);
    }

    #[test]
    fn metrics_rounding() {
        let metrics = FontMetrics {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
        };
        assert_eq!(metrics.ascent_px(12), 10);
        assert_eq!(metrics.descent_px(12), -2);
        assert_eq!(FontMetrics { units_per_em: 0, ..metrics }.scale(12), 0.0);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }
}
