//! Text rendering of trimmed glyphs for quick inspection in a terminal.
use crate::{pack::FontPack, trim::TrimmedGlyph};

const SET: char = '#';
const CLEAR: char = '.';

/// Renders a single glyph's rows, `#` for set pixels and `.` for clear ones.
pub fn render_glyph(glyph: &TrimmedGlyph) -> String {
    let mut out = String::with_capacity((glyph.width + 1) * glyph.height);
    for y in 0..glyph.height {
        for x in 0..glyph.width {
            out.push(if glyph.pixel(x, y) { SET } else { CLEAR });
        }
        out.push('\n');
    }
    out
}

/// Renders the whole pack, `columns` glyphs per band, placed on a shared baseline.
///
/// Each glyph occupies a cell as wide as the widest glyph; its trimmed box is
/// drawn at its x offset, and rows outside the box stay blank.
pub fn render_pack(pack: &FontPack, columns: usize) -> String {
    let columns = columns.max(1);
    let baseline = pack.meta.ascent;
    let cell_width = pack.meta.bounds.width.max(1);
    let glyphs: Vec<(u32, &TrimmedGlyph)> = pack.glyphs.iter().map(|(c, g)| (*c, g)).collect();

    let mut out = String::new();
    for band in glyphs.chunks(columns) {
        let top = band.iter().map(|(_, g)| glyph_top(g, baseline)).min().unwrap_or(0);
        let bottom = band
            .iter()
            .map(|(_, g)| glyph_top(g, baseline) + g.height as i32)
            .max()
            .unwrap_or(0);

        let labels: Vec<String> = band
            .iter()
            .map(|(code, _)| format!("{:<cell_width$}", label(*code)))
            .collect();
        out.push_str(labels.join(" ").trim_end());
        out.push('\n');

        for y in top..bottom {
            let row: Vec<String> = band
                .iter()
                .map(|(_, g)| render_cell_row(g, y - glyph_top(g, baseline), cell_width))
                .collect();
            out.push_str(row.join(" ").trim_end());
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Row of the glyph's first kept line, counted from the top of the cell.
fn glyph_top(glyph: &TrimmedGlyph, baseline: i32) -> i32 {
    baseline - glyph.y_offset - 1
}

fn render_cell_row(glyph: &TrimmedGlyph, row: i32, cell_width: usize) -> String {
    (0..cell_width)
        .map(|x| {
            if row < 0 || row >= glyph.height as i32 {
                return ' ';
            }
            let tx = x as i32 - glyph.x_offset;
            if tx >= 0 && glyph.pixel(tx as usize, row as usize) {
                SET
            } else if x < glyph.width {
                CLEAR
            } else {
                ' '
            }
        })
        .collect()
}

fn label(code: u32) -> String {
    match char::from_u32(code) {
        Some(ch) if !ch.is_control() => ch.to_string(),
        _ => format!("U+{code:04X}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pack::{assemble, FontInfo},
        test_support::{grid_from_ascii, FixedRasterizer},
        trim::trim,
        FontMetrics, GlyphOutline,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn single_glyph_rows() {
        let grid = grid_from_ascii(&["....", ".##.", ".#..", "...."]);
        let glyph = trim(&grid, 3, 4.0);
        assert_eq!(render_glyph(&glyph), "##..\n#...\n");
    }

    #[test]
    fn pack_shares_baseline() {
        // 10 rows at 10px with ascender 800: baseline row 8
        let dot = grid_from_ascii(&[
            "...", "...", "...", "...", "...", "...", "...", ".#.", "...", "...",
        ]);
        let bar = grid_from_ascii(&[
            "...", "...", "...", "...", "...", ".#.", ".#.", ".#.", "...", "...",
        ]);
        let info = FontInfo {
            family: "Preview".into(),
            version: None,
            metrics: FontMetrics {
                units_per_em: 1000,
                ascender: 800,
                descender: -200,
            },
        };
        let glyphs = vec![
            (0x2E, GlyphOutline::new(300.0)),
            (0x7C, GlyphOutline::new(300.0)),
        ];
        let pack = assemble(&glyphs, &info, 10, &mut FixedRasterizer::new(vec![dot, bar]));
        let text = render_pack(&pack, 16);
        assert_eq!(text, ".   |\n    .#.\n    .#.\n.#. .#.\n\n");
    }

    #[test]
    fn control_codes_are_labelled_by_value() {
        assert_eq!(label(0x41), "A");
        assert_eq!(label(0x7F), "U+007F");
    }
}
