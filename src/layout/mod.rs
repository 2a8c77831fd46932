//! Fitting and wrapping text inside a box.
//!
//! Given a string, a box, and a list of candidate fonts ordered largest
//! first, layout picks the largest font the text fits at and works out where
//! its lines break. The pieces build on each other:
//!
//! - [`Tokenizer`](crate::layout::Tokenizer) - splits text into atomic tokens that are never split
//!   across lines ([`CharTokenizer`](crate::layout::CharTokenizer),
//!   [`ClassifyingTokenizer`](crate::layout::ClassifyingTokenizer))
//! - [`break_lines`](crate::layout::break_lines) - greedily packs tokens into lines no wider than the
//!   box, optionally rejecting breaks that leave too much space at the end of a line
//! - [`find_fitting_font`](crate::layout::find_fitting_font) - tries each candidate in turn and
//!   returns the first one whose lines fit in the box's height
//! - [`TextLayout`](crate::layout::TextLayout) - runs the search once, remembers the result, and
//!   draws the lines onto a [`Canvas`](crate::Canvas)
//!
//! # Example
//!
//! ```no_run
//! use boxfit::layout::{LayoutConfig, TextLayout, TokenizerKind};
//! use boxfit::{candidate_sizes, colours, Font, PixmapCanvas, Px, Rect};
//!
//! let font = Font::open("assets/NotoSansSC-Regular.ttf").expect("can load font");
//! let mut canvas = PixmapCanvas::open("cover.png").expect("can load image");
//!
//! let rect = Rect::from_fractions(canvas.width(), canvas.height(), 0.1, 0.6, 0.8, 0.2);
//! let candidates = font.at_sizes(&candidate_sizes(5, rect.height.0 as u32, 3));
//! let config = LayoutConfig::for_box(&rect)
//!     .with_line_space(Px(10.0))
//!     .with_right_padding(Px(10.0));
//!
//! let layout = TextLayout::new("谋杀我的完美偶像", &candidates, &TokenizerKind::Chars, config);
//! layout.draw_in(&mut canvas, &rect, colours::WHITE).expect("text fits");
//! canvas.save("cover-titled.png").expect("can save image");
//! ```

mod fit;
mod lines;
mod text;
mod tokenize;

pub use fit::*;
pub use lines::*;
pub use text::*;
pub use tokenize::*;
