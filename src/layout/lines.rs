use super::tokenize::Token;
use crate::{FontMetrics, Px};
use thiserror::Error;

/// One visual row of tokens
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'t> {
    pub tokens: Vec<Token<'t>>,
    /// Sum of the measured widths of `tokens`
    pub width: Px,
}

impl Line<'_> {
    /// The text of the line, i.e. its tokens joined back together
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Why a set of tokens couldn't be broken into lines at a given font
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum BreakError {
    /// Closing a line would have left more empty space at its end than the
    /// configured right padding allows
    #[error("line break leaves {slack} of space at the end of a line, more than the {limit} allowed")]
    Ragged { slack: Px, limit: Px },

    /// A single token is wider than the box, so it can't be placed on any line
    #[error("a token {width} wide can't fit on a line {box_width} wide")]
    TokenTooWide { width: Px, box_width: Px },
}

/// Greedily packs `tokens` into lines no wider than `box_width`, measuring each
/// token with `font`. Tokens are never split: when the next token doesn't fit
/// on the current line, the line is closed and the token starts a new one.
///
/// With a `right_padding`, every line closed because of overflow must end no
/// more than `right_padding` short of `box_width`; the final line is exempt.
/// Breaking stops with [BreakError::Ragged] at the first line that doesn't
/// meet this, and with [BreakError::TokenTooWide] at the first token wider
/// than `box_width`, wherever it falls.
pub fn break_lines<'t, F: FontMetrics + ?Sized>(
    font: &F,
    tokens: &[Token<'t>],
    box_width: Px,
    right_padding: Option<Px>,
) -> Result<Vec<Line<'t>>, BreakError> {
    let mut lines: Vec<Line<'t>> = Vec::new();
    let mut current: Vec<Token<'t>> = Vec::new();
    let mut width = Px::ZERO;

    for &token in tokens {
        let token_width = font.width(token.text);
        if width + token_width <= box_width {
            current.push(token);
            width += token_width;
            continue;
        }

        if token_width > box_width {
            log::trace!("token {:?} is {token_width} wide, box is {box_width}", token.text);
            return Err(BreakError::TokenTooWide {
                width: token_width,
                box_width,
            });
        }

        if let Some(limit) = right_padding {
            let slack = box_width - width;
            if slack > limit {
                log::trace!("breaking before {:?} leaves {slack} (> {limit})", token.text);
                return Err(BreakError::Ragged { slack, limit });
            }
        }

        lines.push(Line {
            tokens: std::mem::replace(&mut current, vec![token]),
            width,
        });
        width = token_width;
    }

    if !current.is_empty() {
        lines.push(Line {
            tokens: current,
            width,
        });
    }

    Ok(lines)
}
