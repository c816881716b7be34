//! One-call conversion from font bytes to a pack, a header file or header text.
use crate::{
    error::{FontError, Result},
    font::OutlineFont,
    gfx::{encode, EncodeOptions, RowLayout},
    header::HeaderFile,
    pack::{assemble, FontPack},
    raster::{Rasterizer, ZenoRasterizer},
    CodeRange,
};

pub const DEFAULT_PIXEL_HEIGHT: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertOptions {
    /// Target glyph cell height in pixels.
    pub pixel_height: u32,
    pub range: CodeRange,
    pub layout: RowLayout,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            range: CodeRange::ASCII,
            layout: RowLayout::Gfx,
        }
    }
}

impl ConvertOptions {
    pub fn with_pixel_height(mut self, pixel_height: u32) -> Self {
        self.pixel_height = pixel_height;
        self
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new(self.range).with_layout(self.layout)
    }
}

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// The in-memory [`FontPack`].
    #[default]
    Pack,
    /// A [`HeaderFile`] named after the font identifier.
    File,
    /// The header text only.
    Text,
}

#[derive(Clone, Debug)]
pub enum Output {
    Pack(FontPack),
    File(HeaderFile),
    Text(String),
}

impl Output {
    pub fn into_pack(self) -> Option<FontPack> {
        match self {
            Output::Pack(pack) => Some(pack),
            _ => None,
        }
    }

    pub fn into_header(self) -> Option<HeaderFile> {
        match self {
            Output::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Output::Text(text) => Some(text),
            Output::File(file) => Some(file.content),
            Output::Pack(_) => None,
        }
    }
}

impl OutlineFont {
    /// Rasterizes and trims every loaded glyph at `pixel_height`.
    pub fn to_pack<R: Rasterizer>(&self, pixel_height: u32, rasterizer: &mut R) -> FontPack {
        assemble(&self.glyphs, &self.info, pixel_height, rasterizer)
    }
}

impl FontPack {
    /// Encodes the pack and renders it as a C header.
    pub fn to_header(&self, options: &EncodeOptions) -> HeaderFile {
        HeaderFile::new(&encode(self, options))
    }
}

/// Converts font file bytes with the default software rasterizer.
///
/// Load failures come back as [`FontError::Conversion`].
pub fn convert(bytes: &[u8], options: &ConvertOptions, mode: OutputMode) -> Result<Output> {
    convert_with(bytes, options, mode, &mut ZenoRasterizer::new())
}

pub fn convert_with<R: Rasterizer>(
    bytes: &[u8],
    options: &ConvertOptions,
    mode: OutputMode,
    rasterizer: &mut R,
) -> Result<Output> {
    let font = OutlineFont::load_range(bytes, options.range).map_err(FontError::conversion)?;
    let pack = font.to_pack(options.pixel_height, rasterizer);
    Ok(match mode {
        OutputMode::Pack => Output::Pack(pack),
        OutputMode::File => Output::File(pack.to_header(&options.encode_options())),
        OutputMode::Text => Output::Text(pack.to_header(&options.encode_options()).content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failure_is_prefixed() {
        let err = convert(b"garbage!", &ConvertOptions::default(), OutputMode::Text)
            .expect_err("garbage must not convert");
        assert!(matches!(err, FontError::Conversion(_)));
        assert!(err
            .to_string()
            .starts_with("Font conversion failed: unsupported font format"));
    }

    #[test]
    fn default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.pixel_height, 12);
        assert_eq!(options.range, CodeRange::ASCII);
        assert_eq!(options.encode_options().layout, RowLayout::Gfx);
    }
}
