use std::cell::OnceCell;

use super::fit::{find_fitting_font, Fit, LayoutConfig};
use super::lines::Line;
use super::tokenize::Tokenizer;
use crate::canvas::Canvas;
use crate::colour::Colour;
use crate::error::LayoutError;
use crate::font::FontMetrics;
use crate::rect::Rect;
use crate::units::Px;

/// Lays a string of text out inside a box, at the largest of a list of
/// candidate fonts that fits, and draws it.
///
/// The search runs the first time the layout is queried or drawn. Once a font
/// is found the result is kept for the life of the layout and every later
/// query or draw reuses it. A failed search isn't remembered, so each call on
/// a layout that doesn't fit searches (and fails) again.
///
/// ```
/// use boxfit::layout::{LayoutConfig, TextLayout, TokenizerKind};
/// use boxfit::{FontMetrics, Px};
///
/// // a stand-in for a real font: every character is half as wide as it is tall
/// struct Block(f32);
/// impl FontMetrics for Block {
///     fn measure(&self, text: &str) -> (Px, Px) {
///         (Px(self.0 / 2.0 * text.chars().count() as f32), Px(self.0))
///     }
/// }
///
/// let candidates = [Block(40.0), Block(30.0), Block(20.0)];
/// let config = LayoutConfig::new(Px(100.0), Px(60.0));
/// let layout = TextLayout::new("hello, world", &candidates, &TokenizerKind::Classifying, config);
///
/// assert_eq!(layout.index().unwrap(), 1);
/// let lines: Vec<String> = layout.lines().unwrap().iter().map(|l| l.text()).collect();
/// assert_eq!(lines, vec!["hello,", " world"]);
/// ```
pub struct TextLayout<'a, F, T: ?Sized = dyn Tokenizer + 'a> {
    text: &'a str,
    candidates: &'a [F],
    tokenizer: &'a T,
    config: LayoutConfig,
    fit: OnceCell<Fit<'a>>,
}

impl<'a, F: FontMetrics, T: Tokenizer + ?Sized> TextLayout<'a, F, T> {
    /// `candidates` must be ordered largest first
    pub fn new(
        text: &'a str,
        candidates: &'a [F],
        tokenizer: &'a T,
        config: LayoutConfig,
    ) -> TextLayout<'a, F, T> {
        TextLayout {
            text,
            candidates,
            tokenizer,
            config,
            fit: OnceCell::new(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Whether a font has been found yet
    pub fn is_fitted(&self) -> bool {
        self.fit.get().is_some()
    }

    /// The selected candidate and line breaks, searching for them if needed
    pub fn fit(&self) -> Result<&Fit<'a>, LayoutError> {
        if let Some(fit) = self.fit.get() {
            return Ok(fit);
        }

        let fit = find_fitting_font(self.candidates, self.text, self.tokenizer, &self.config)
            .ok_or(LayoutError::NoFittingFont {
                candidates: self.candidates.len(),
            })?;
        Ok(self.fit.get_or_init(|| fit))
    }

    /// Position of the selected font within the candidates
    pub fn index(&self) -> Result<usize, LayoutError> {
        self.fit().map(|fit| fit.index)
    }

    /// The selected font
    pub fn font(&self) -> Result<&'a F, LayoutError> {
        let index = self.index()?;
        Ok(&self.candidates[index])
    }

    /// The text broken into lines at the selected font
    pub fn lines(&self) -> Result<&[Line<'a>], LayoutError> {
        self.fit().map(|fit| fit.lines.as_slice())
    }

    /// The vertical space drawing will take up: every line's height plus the
    /// line spacing after it, the last line included
    pub fn height(&self) -> Result<Px, LayoutError> {
        let font = self.font()?;
        Ok(self
            .lines()?
            .iter()
            .map(|line| font.line_height(&line.text()) + self.config.line_space)
            .sum())
    }

    /// Draws each line of text, top to bottom, starting with the top-left corner
    /// of the first line at `(x, y)`. If no font fits, nothing is drawn.
    pub fn draw<C: Canvas<F> + ?Sized>(
        &self,
        canvas: &mut C,
        x: Px,
        y: Px,
        colour: Colour,
    ) -> Result<(), LayoutError> {
        let font = self.font()?;
        let lines = self.lines()?;

        let mut y = y;
        for line in lines {
            let text = line.text();
            canvas.draw_text(x, y, &text, font, colour);
            y += font.line_height(&text) + self.config.line_space;
        }
        Ok(())
    }

    /// Draws the text at the origin of `rect`
    pub fn draw_in<C: Canvas<F> + ?Sized>(
        &self,
        canvas: &mut C,
        rect: &Rect,
        colour: Colour,
    ) -> Result<(), LayoutError> {
        self.draw(canvas, rect.x, rect.y, colour)
    }
}
