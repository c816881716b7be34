//! Adafruit GFX encoding: flat bitmap stream plus glyph table.
//!
//! Each glyph's bitmap, stored with rows padded to the source grid's byte
//! stride, is re-packed bit by bit. In the [`RowLayout::Gfx`] layout bits run on
//! from one row to the next and only the glyph's final byte is padded; that is
//! what `Adafruit_GFX::drawChar` reads. [`RowLayout::RowAligned`] pads every row.
use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::{pack::FontPack, trim::TrimmedGlyph, CodeRange};

/// Identifiers that cannot be used as C/C++ variable names.
static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "auto", "double", "int", "struct", "break", "else", "long", "switch", "case", "enum",
        "register", "typedef", "char", "extern", "return", "union", "const", "float", "short",
        "unsigned", "continue", "for", "signed", "void", "default", "goto", "sizeof", "volatile",
        "do", "if", "static", "while",
    ]
    .into_iter()
    .collect()
});

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowLayout {
    /// Rows follow each other without padding; the glyph ends on a byte boundary.
    #[default]
    Gfx,
    /// Every row starts on a byte boundary.
    RowAligned,
}

impl RowLayout {
    /// Encoded size in bytes of a `width` x `height` glyph.
    pub fn glyph_len(self, width: usize, height: usize) -> usize {
        match self {
            RowLayout::Gfx => (width * height).div_ceil(8),
            RowLayout::RowAligned => width.div_ceil(8) * height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodeOptions {
    pub range: CodeRange,
    pub layout: RowLayout,
}

impl EncodeOptions {
    pub fn new(range: CodeRange) -> Self {
        Self {
            range,
            layout: RowLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// One `GFXglyph` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GfxGlyph {
    /// Byte offset of the glyph in the bitmap stream.
    pub bitmap_offset: usize,
    pub width: usize,
    pub height: usize,
    pub x_advance: i32,
    pub x_offset: i32,
    /// Offset from the cursor baseline to the top row, negative upwards.
    pub y_offset: i32,
}

/// A font pack encoded for the GFX renderer. Built by [`encode`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedFont {
    pub name: String,
    pub bitmap: Vec<u8>,
    pub glyphs: Vec<GfxGlyph>,
    pub first: u32,
    pub last: u32,
    pub y_advance: u32,
}

/// Encodes every glyph of `pack` inside `options.range`, in code point order.
///
/// Code points missing from the pack are skipped without leaving a gap, so
/// offsets stay contiguous. An empty or reversed range yields an empty font.
pub fn encode(pack: &FontPack, options: &EncodeOptions) -> EncodedFont {
    let mut bitmap = Vec::new();
    let mut glyphs = Vec::new();

    for code in options.range.iter() {
        let Some(glyph) = pack.glyph(code) else {
            continue;
        };
        let bytes = pack_glyph(glyph, options.layout);
        glyphs.push(GfxGlyph {
            bitmap_offset: bitmap.len(),
            width: glyph.width,
            height: glyph.height,
            x_advance: glyph.x_advance,
            x_offset: glyph.x_offset,
            y_offset: -glyph.y_offset,
        });
        bitmap.extend_from_slice(&bytes);
    }

    let name = font_identifier(&pack.meta.name, pack.meta.size.points);
    log::debug!(
        "encoded {name}: {} glyphs, {} bitmap bytes",
        glyphs.len(),
        bitmap.len()
    );

    EncodedFont {
        name,
        bitmap,
        glyphs,
        first: options.range.first,
        last: options.range.last,
        y_advance: y_advance(pack.meta.size.points),
    }
}

/// Line height: the point size plus ten percent, rounded down.
pub fn y_advance(points: u32) -> u32 {
    points + points / 10
}

pub fn pack_glyph(glyph: &TrimmedGlyph, layout: RowLayout) -> Vec<u8> {
    pack_bits(&glyph.bitmap, glyph.width, glyph.height, layout)
}

/// Re-packs `height` rows of `width` pixels stored with a `ceil(width / 8)` stride.
pub fn pack_bits(src: &[u8], width: usize, height: usize, layout: RowLayout) -> Vec<u8> {
    let stride = width.div_ceil(8);
    let mut out = BitWriter::with_capacity(layout.glyph_len(width, height));
    for row in 0..height {
        for col in 0..width {
            let byte = src.get(row * stride + col / 8).copied().unwrap_or(0);
            out.push(byte & (0x80 >> (col % 8)) != 0);
        }
        if layout == RowLayout::RowAligned {
            out.align();
        }
    }
    out.finish()
}

struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    used: u8,
}

impl BitWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            current: 0,
            used: 0,
        }
    }

    fn push(&mut self, bit: bool) {
        if bit {
            self.current |= 0x80 >> self.used;
        }
        self.used += 1;
        if self.used == 8 {
            self.align();
        }
    }

    /// Flushes a partially filled byte, zero padded.
    fn align(&mut self) {
        if self.used > 0 {
            self.bytes.push(self.current);
            self.current = 0;
            self.used = 0;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        self.align();
        self.bytes
    }
}

/// Identifier for a font of `family` at `points`, e.g. `Open_Sans_12`.
pub fn font_identifier(family: &str, points: u32) -> String {
    c_identifier(&format!("{family}_{points}"))
}

/// Turns an arbitrary label into a C identifier.
///
/// Characters outside `[A-Za-z0-9]` become `_` (one per UTF-16 unit), a leading
/// digit gets a `_` prefix and reserved words get a `_` suffix.
pub fn c_identifier(label: &str) -> String {
    let mut ident = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            ident.push(ch);
        } else {
            for _ in 0..ch.len_utf16() {
                ident.push('_');
            }
        }
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED_WORDS.contains(ident.as_str()) {
        ident.push('_');
    }
    ident
}
