use crate::{FontError, Px};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use std::fmt;
use std::path::Path;

/// Anything that can measure how much room a string takes up when rendered.
///
/// Layout only ever talks to fonts through this trait, so candidates can be
/// real [SizedFont]s, or any other provider (a fixed-width stub in tests, a
/// rasteriser from another crate). Implementations must be deterministic: the
/// same string always measures the same.
pub trait FontMetrics {
    /// Returns `(advance_width, line_height)` for `text`
    fn measure(&self, text: &str) -> (Px, Px);

    /// The horizontal advance of `text`
    fn width(&self, text: &str) -> Px {
        self.measure(text).0
    }

    /// The height of one rendered line of `text`
    fn line_height(&self, text: &str) -> Px {
        self.measure(text).1
    }
}

impl<T: FontMetrics + ?Sized> FontMetrics for &T {
    fn measure(&self, text: &str) -> (Px, Px) {
        (**self).measure(text)
    }
}

/// A parsed TTF or OTF font face, independent of size. Pair it with a size via
/// [Font::at] or [Font::at_sizes] to get something layout can measure with.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, FontError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Read and parse a font file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Font, FontError> {
        let bytes = std::fs::read(path)?;
        Self::load(bytes)
    }

    pub(crate) fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Factor converting font units into pixels at the given size
    pub fn scaling(&self, size: Px) -> f32 {
        size.0 / self.face().units_per_em().max(1) as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face().ascender() as f32)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face().descender() as f32)
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face().line_gap() as f32)
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Px) -> Px {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// The glyph used to draw `ch`. Characters missing from the font fall back
    /// to the replacement character, then to a question mark.
    pub fn glyph(&self, ch: char) -> Option<GlyphId> {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
    }

    /// Horizontal advance of a glyph, in pixels at the given size
    pub fn advance(&self, gid: GlyphId, size: Px) -> Px {
        Px(self.scaling(size) * self.face().glyph_hor_advance(gid).unwrap_or_default() as f32)
    }

    /// Pair this face with a size
    pub fn at(&self, size: Px) -> SizedFont<'_> {
        SizedFont { font: self, size }
    }

    /// Pair this face with each of `sizes`, preserving their order. Hand the
    /// result of [candidate_sizes] in here to get a descending candidate list.
    pub fn at_sizes(&self, sizes: &[Px]) -> Vec<SizedFont<'_>> {
        sizes.iter().map(|&size| self.at(size)).collect()
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("glyphs", &self.face().number_of_glyphs())
            .finish()
    }
}

/// A [Font] at a specific size
#[derive(Debug, Copy, Clone)]
pub struct SizedFont<'f> {
    pub font: &'f Font,
    pub size: Px,
}

impl SizedFont<'_> {
    /// Distance from the top of a line to its baseline
    pub fn ascent(&self) -> Px {
        self.font.ascent(self.size)
    }
}

impl FontMetrics for SizedFont<'_> {
    fn measure(&self, text: &str) -> (Px, Px) {
        let width = text
            .chars()
            .filter_map(|ch| self.font.glyph(ch))
            .map(|gid| self.font.advance(gid, self.size))
            .sum();
        (width, self.font.line_height(self.size))
    }
}

/// Builds a descending list of font sizes from `min` (inclusive) up to `max`
/// (exclusive) in increments of `step`, largest first. The largest size is the
/// last one reachable from `min`, not necessarily `max - 1`.
///
/// A `step` of zero, or an empty range, yields no sizes.
pub fn candidate_sizes(min: u32, max: u32, step: u32) -> Vec<Px> {
    if step == 0 {
        return Vec::new();
    }
    let mut sizes: Vec<Px> = (min..max).step_by(step as usize).map(Px::from).collect();
    sizes.reverse();
    sizes
}
