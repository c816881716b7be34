//! C header serialization of an [`EncodedFont`].
use crate::gfx::EncodedFont;

pub const HEADER_EXTENSION: &str = "h";

/// A generated header and the identifier it defines.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderFile {
    pub name: String,
    pub content: String,
}

impl HeaderFile {
    pub fn new(font: &EncodedFont) -> Self {
        Self {
            name: font.name.clone(),
            content: render(font),
        }
    }

    /// `{name}.h`
    pub fn file_name(&self) -> String {
        format!("{}.{HEADER_EXTENSION}", self.name)
    }
}

/// Renders the `PROGMEM` bitmap array, glyph table and `GFXfont` record.
pub fn render(font: &EncodedFont) -> String {
    let name = &font.name;
    let bytes = font
        .bitmap
        .iter()
        .map(|b| format!("0x{b:02X}"))
        .collect::<Vec<_>>()
        .join(", ");
    let glyphs = font
        .glyphs
        .iter()
        .map(|g| {
            format!(
                "\t{{\t{},\t{},\t{},\t{},\t{},\t{}}}",
                g.bitmap_offset, g.width, g.height, g.x_advance, g.x_offset, g.y_offset
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "\nconst uint8_t {name}Bitmaps[] PROGMEM = {{\n{bytes}\n}};\n\
         const GFXglyph {name}Glyphs[] PROGMEM = {{\n{glyphs}\n}};\n\
         const GFXfont {name} PROGMEM = {{\n    \
         (uint8_t *){name}Bitmaps,\n    \
         (GFXglyph *){name}Glyphs,\n    \
         0x{first:02X}, 0x{last:02X}, {y_advance}}};\n",
        first = font.first,
        last = font.last,
        y_advance = font.y_advance,
    )
}
