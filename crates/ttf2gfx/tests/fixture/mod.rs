//! An in-memory TrueType font with pixel-aligned rectangle glyphs.
//!
//! Metrics are 1000 units per em, ascender 800 and descender -200, so at a
//! pixel height of 10 one unit row is 100 font units and the baseline sits on
//! row 8. Every edge lands on a pixel boundary, which keeps coverage exact.
#![allow(dead_code)]

use kurbo::{Rect, Shape};
use write_fonts::{
    tables::{
        cmap::Cmap,
        glyf::{GlyfLocaBuilder, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        name::{Name, NameRecord},
    },
    types::{FWord, GlyphId, NameId},
    FontBuilder,
};

pub const FAMILY: &str = "Pixel Test";
pub const VERSION: &str = "Version 1.000";

/// Pixel height the expectations below are written for.
pub const PIXEL_HEIGHT: u32 = 10;

/// (name, advance, filled rectangle in font units)
const GLYPHS: [(&str, u16, Option<(f64, f64, f64, f64)>); 5] = [
    (".notdef", 500, Some((100.0, 0.0, 400.0, 700.0))),
    ("space", 300, None),
    ("I", 400, Some((100.0, 0.0, 300.0, 700.0))),
    ("period", 300, Some((100.0, 0.0, 200.0, 100.0))),
    ("underscore", 600, Some((0.0, -200.0, 600.0, -100.0))),
];

const CMAP: [(char, u32); 4] = [(' ', 1), ('I', 2), ('.', 3), ('_', 4)];

pub fn build_font() -> Vec<u8> {
    build_font_named(FAMILY)
}

pub fn build_font_named(family: &str) -> Vec<u8> {
    let mut glyf_builder = GlyfLocaBuilder::new();
    for (name, _, rect) in GLYPHS {
        let glyph = match rect {
            Some((x0, y0, x1, y1)) => {
                SimpleGlyph::from_bezpath(&Rect::new(x0, y0, x1, y1).to_path(0.1))
                    .unwrap_or_else(|e| panic!("bad outline for {name}: {e:?}"))
            }
            None => SimpleGlyph::default(),
        };
        glyf_builder.add_glyph(&glyph).unwrap();
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let head = Head {
        units_per_em: 1000,
        index_to_loc_format: match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        },
        ..Default::default()
    };
    let hhea = Hhea {
        ascender: FWord::new(800),
        descender: FWord::new(-200),
        number_of_h_metrics: GLYPHS.len() as u16,
        ..Default::default()
    };
    let hmtx = Hmtx {
        h_metrics: GLYPHS
            .iter()
            .map(|(_, advance, rect)| LongMetric {
                advance: *advance,
                side_bearing: rect.map(|r| r.0 as i16).unwrap_or(0),
            })
            .collect(),
        left_side_bearings: vec![],
    };
    let maxp = Maxp {
        num_glyphs: GLYPHS.len() as u16,
        ..Default::default()
    };
    let cmap =
        Cmap::from_mappings(CMAP.iter().map(|(ch, gid)| (*ch, GlyphId::new(*gid)))).unwrap();

    let mut name = Name::default();
    for (id, value) in [(NameId::FAMILY_NAME, family), (NameId::VERSION_STRING, VERSION)] {
        name.name_record.push(NameRecord {
            platform_id: 3,
            encoding_id: 1,
            language_id: 0x409,
            name_id: id,
            string: value.to_string().into(),
        });
    }

    let mut builder = FontBuilder::new();
    builder
        .add_table(&head)
        .unwrap()
        .add_table(&hhea)
        .unwrap()
        .add_table(&hmtx)
        .unwrap()
        .add_table(&maxp)
        .unwrap()
        .add_table(&cmap)
        .unwrap()
        .add_table(&name)
        .unwrap()
        .add_table(&glyf)
        .unwrap()
        .add_table(&loca)
        .unwrap();
    builder.build()
}
