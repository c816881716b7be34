use std::{io::Read, path::Path};

use skrifa::{
    instance::{LocationRef, Size},
    outline::DrawSettings,
    raw::TableProvider,
    string::StringId,
    FontRef, GlyphId, GlyphNames, MetadataProvider,
};

use crate::{
    outline::{FontMetrics, GlyphOutline},
    pack::{FontInfo, UNKNOWN_FAMILY},
    CodeRange, FontError, Result,
};

pub(crate) const WOFF_SIGNATURE: &[u8] = b"wOFF";
pub(crate) const WOFF2_SIGNATURE: &[u8] = b"wOF2";

/// File extensions picked from archives, in order of preference.
#[cfg(feature = "archive")]
const ARCHIVE_FONT_EXTENSIONS: [&str; 4] = [".ttf", ".otf", ".ttc", ".woff"];

/// Container format, detected from the leading bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Container {
    /// TrueType or CFF flavored OpenType, or a collection.
    Sfnt,
    Woff,
    Woff2,
    Zip,
    Unknown,
}

impl Container {
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.get(0..4) {
            Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") | Some(b"OTTO") | Some(b"ttcf") => {
                Container::Sfnt
            }
            Some(WOFF_SIGNATURE) => Container::Woff,
            Some(WOFF2_SIGNATURE) => Container::Woff2,
            Some([b'P', b'K', 0x03, 0x04]) => Container::Zip,
            _ => Container::Unknown,
        }
    }
}

/// The glyph outlines of one font for a block of code points.
///
/// Characters without a cmap entry fall back to glyph 0 (`.notdef`), so every
/// code point of the range has an outline.
#[derive(Clone, Debug)]
pub struct OutlineFont {
    pub info: FontInfo,
    pub glyphs: Vec<(u32, GlyphOutline)>,
}

impl OutlineFont {
    /// Loads the printable ASCII block from TTF, OTF, TTC, WOFF or zipped font data.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        Self::load_range(bytes, CodeRange::ASCII)
    }

    pub fn load_range(bytes: &[u8], range: CodeRange) -> Result<Self> {
        match Container::detect(bytes) {
            Container::Sfnt => Self::from_sfnt(bytes, range),
            #[cfg(feature = "woff")]
            Container::Woff => {
                let sfnt = crate::woff::decode(bytes)?;
                Self::from_sfnt(&sfnt, range)
            }
            #[cfg(not(feature = "woff"))]
            Container::Woff => Err(FontError::UnsupportedFormat("WOFF")),
            Container::Woff2 => Err(FontError::UnsupportedFormat("WOFF2")),
            #[cfg(feature = "archive")]
            Container::Zip => Self::from_archive(bytes, range),
            #[cfg(not(feature = "archive"))]
            Container::Zip => Err(FontError::UnsupportedFormat("zip archive")),
            Container::Unknown => Err(FontError::UnsupportedFormat("unrecognized font data")),
        }
    }

    pub fn read<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::load(&buf)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::load(&bytes)
    }

    pub fn family(&self) -> &str {
        &self.info.family
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.info.metrics
    }

    fn from_sfnt(bytes: &[u8], range: CodeRange) -> Result<Self> {
        let font = FontRef::from_index(bytes, 0)?;
        let head = font.head()?;
        let hhea = font.hhea()?;
        let metrics = FontMetrics {
            units_per_em: head.units_per_em(),
            ascender: hhea.ascender().to_i16(),
            descender: hhea.descender().to_i16(),
        };
        let family = name_string(&font, StringId::FAMILY_NAME)
            .unwrap_or_else(|| UNKNOWN_FAMILY.to_string());
        let version = name_string(&font, StringId::VERSION_STRING);

        let charmap = font.charmap();
        let glyph_metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
        let outlines = font.outline_glyphs();
        let names = GlyphNames::new(&font);

        let mut glyphs = Vec::with_capacity(range.len());
        for code in range.iter() {
            let gid = match char::from_u32(code).and_then(|ch| charmap.map(ch)) {
                Some(gid) => gid,
                None => {
                    log::warn!("U+{code:04X} not mapped in '{family}', using .notdef");
                    GlyphId::NOTDEF
                }
            };
            let mut outline = GlyphOutline::new(glyph_metrics.advance_width(gid).unwrap_or(0.0));
            if let Some(name) = names.get(gid) {
                outline = outline.with_name(name.as_str());
            }
            if let Some(glyph) = outlines.get(gid) {
                let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
                glyph.draw(settings, &mut outline).map_err(|e| {
                    FontError::Outline(format!("glyph {} for U+{code:04X}: {e}", gid.to_u32()))
                })?;
                outline.finish();
            }
            glyphs.push((code, outline));
        }

        log::debug!(
            "loaded '{family}': {} upem, ascender {}, descender {}, {} glyphs",
            metrics.units_per_em,
            metrics.ascender,
            metrics.descender,
            glyphs.len()
        );

        Ok(Self {
            info: FontInfo {
                family,
                version,
                metrics,
            },
            glyphs,
        })
    }

    #[cfg(feature = "archive")]
    fn from_archive(bytes: &[u8], range: CodeRange) -> Result<Self> {
        use std::io::Cursor;
        use zip::ZipArchive;

        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| FontError::Parse(format!("zip open error: {e}")))?;
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        for ext in ARCHIVE_FONT_EXTENSIONS {
            let Some(name) = names
                .iter()
                .find(|n| n.to_ascii_lowercase().ends_with(ext))
            else {
                continue;
            };
            let mut file = archive
                .by_name(name)
                .map_err(|e| FontError::Parse(format!("zip entry error: {e}")))?;
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            log::debug!("loading '{name}' from archive");
            return Self::load_range(&data, range);
        }
        Err(FontError::EmptyArchive)
    }
}

fn name_string(font: &FontRef, id: StringId) -> Option<String> {
    font.localized_strings(id)
        .english_or_first()
        .map(|s| s.chars().collect::<String>())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_containers() {
        assert_eq!(Container::detect(&[0, 1, 0, 0, 9]), Container::Sfnt);
        assert_eq!(Container::detect(b"OTTO...."), Container::Sfnt);
        assert_eq!(Container::detect(b"ttcf"), Container::Sfnt);
        assert_eq!(Container::detect(b"wOFF"), Container::Woff);
        assert_eq!(Container::detect(b"wOF2"), Container::Woff2);
        assert_eq!(Container::detect(b"PK\x03\x04rest"), Container::Zip);
        assert_eq!(Container::detect(b"flf2a"), Container::Unknown);
        assert_eq!(Container::detect(b"ab"), Container::Unknown);
    }

    #[test]
    fn rejects_woff2_and_garbage() {
        assert!(matches!(
            OutlineFont::load(b"wOF2\0\0\0\0"),
            Err(FontError::UnsupportedFormat("WOFF2"))
        ));
        assert!(matches!(
            OutlineFont::load(b"not a font"),
            Err(FontError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn truncated_sfnt_is_parse_error() {
        assert!(matches!(
            OutlineFont::load(&[0, 1, 0, 0, 0, 3]),
            Err(FontError::Parse(_))
        ));
    }
}
