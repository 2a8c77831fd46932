use super::lines::{break_lines, BreakError, Line};
use super::tokenize::{Token, Tokenizer};
use crate::{FontMetrics, Px, Rect};

/// Geometry and quality constraints for fitting text into a box
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LayoutConfig {
    pub box_width: Px,
    pub box_height: Px,
    /// Extra vertical space added after every line
    pub line_space: Px,
    /// The most empty space allowed at the end of a line that was broken
    /// early. `None` accepts any amount.
    pub right_padding: Option<Px>,
}

impl LayoutConfig {
    /// A box of the given size with no line spacing and no right padding limit
    pub fn new(box_width: Px, box_height: Px) -> LayoutConfig {
        LayoutConfig {
            box_width,
            box_height,
            ..Default::default()
        }
    }

    /// A config matching the size of `rect`
    pub fn for_box(rect: &Rect) -> LayoutConfig {
        Self::new(rect.width, rect.height)
    }

    pub fn with_line_space(self, line_space: Px) -> LayoutConfig {
        LayoutConfig { line_space, ..self }
    }

    pub fn with_right_padding(self, right_padding: Px) -> LayoutConfig {
        LayoutConfig {
            right_padding: Some(right_padding),
            ..self
        }
    }

    /// How many lines of the given height stack into the box. `None` means
    /// there is no limit, which only happens when lines take up no room.
    pub fn max_lines(&self, line_height: Px) -> Option<usize> {
        let pitch = line_height + self.line_space;
        if pitch.0 <= 0.0 {
            return None;
        }
        Some((self.box_height.0 / pitch.0).floor().max(0.0) as usize)
    }

    /// The fewest lines a run of text this wide could ever be broken into.
    /// `None` means it can't be broken into any number of lines at all.
    pub fn min_lines(&self, text_width: Px) -> Option<usize> {
        if text_width.0 <= 0.0 {
            return Some(0);
        }
        if self.box_width.0 <= 0.0 {
            return None;
        }
        Some((text_width.0 / self.box_width.0).ceil() as usize)
    }
}

/// What happened when a single candidate was tried
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// Even unbroken, the text needs more lines than the box has room for
    TooManyLinesEstimate {
        min_lines: Option<usize>,
        max_lines: Option<usize>,
    },
    /// The line breaker refused the candidate
    Rejected(BreakError),
    /// Breaking succeeded but produced more lines than fit
    TooManyLines { lines: usize, max_lines: usize },
    /// The candidate fits, producing this many lines
    Fits { lines: usize },
}

impl CandidateOutcome {
    pub fn fits(&self) -> bool {
        matches!(self, CandidateOutcome::Fits { .. })
    }
}

/// The chosen candidate and how the text breaks with it
#[derive(Debug, Clone, PartialEq)]
pub struct Fit<'t> {
    /// Position of the chosen font within the candidate list
    pub index: usize,
    pub lines: Vec<Line<'t>>,
}

/// The cheap half of the fit test: measures the unbroken text and checks that
/// the fewest lines it could possibly need fit in the box. Returns the number
/// of lines the box has room for.
fn estimate<F: FontMetrics + ?Sized>(
    font: &F,
    text: &str,
    config: &LayoutConfig,
) -> Result<Option<usize>, CandidateOutcome> {
    let (text_width, text_height) = font.measure(text);
    let max_lines = config.max_lines(text_height);
    let min_lines = config.min_lines(text_width);

    let too_many = match (min_lines, max_lines) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(min), Some(max)) => min > max,
    };
    if too_many {
        return Err(CandidateOutcome::TooManyLinesEstimate {
            min_lines,
            max_lines,
        });
    }
    Ok(max_lines)
}

fn break_within<'t, F: FontMetrics + ?Sized>(
    font: &F,
    tokens: &[Token<'t>],
    max_lines: Option<usize>,
    config: &LayoutConfig,
) -> Result<Vec<Line<'t>>, CandidateOutcome> {
    let lines = break_lines(font, tokens, config.box_width, config.right_padding)
        .map_err(CandidateOutcome::Rejected)?;

    match max_lines {
        Some(max_lines) if lines.len() > max_lines => Err(CandidateOutcome::TooManyLines {
            lines: lines.len(),
            max_lines,
        }),
        _ => Ok(lines),
    }
}

/// Runs the full fit test for one candidate font: the cheap line-count
/// estimate on the unbroken text, then line breaking, then the real line count.
///
/// `tokens` must be the tokenization of `text`.
pub fn evaluate_candidate<'t, F: FontMetrics + ?Sized>(
    font: &F,
    text: &str,
    tokens: &[Token<'t>],
    config: &LayoutConfig,
) -> Result<Vec<Line<'t>>, CandidateOutcome> {
    let max_lines = estimate(font, text, config)?;
    break_within(font, tokens, max_lines, config)
}

/// Finds the first candidate, in the order given, that fits `text` in the box.
/// Candidates are expected largest first, so the result is the largest font
/// that fits. The text is tokenized at most once, and only if some candidate
/// survives the cheap line-count estimate.
pub fn find_fitting_font<'t, F: FontMetrics, T: Tokenizer + ?Sized>(
    candidates: &[F],
    text: &'t str,
    tokenizer: &T,
    config: &LayoutConfig,
) -> Option<Fit<'t>> {
    let mut tokens: Option<Vec<Token<'t>>> = None;

    for (index, font) in candidates.iter().enumerate() {
        let result = estimate(font, text, config).and_then(|max_lines| {
            let tokens = tokens.get_or_insert_with(|| tokenizer.parse(text));
            break_within(font, tokens, max_lines, config)
        });

        match result {
            Ok(lines) => {
                log::info!(
                    "candidate {index} of {} fits in {} lines",
                    candidates.len(),
                    lines.len()
                );
                return Some(Fit { index, lines });
            }
            Err(outcome) => log::debug!("candidate {index}: {outcome:?}"),
        }
    }

    log::info!("none of {} candidates fit", candidates.len());
    None
}

/// Tries every candidate without stopping at the first fit, reporting what
/// happened to each. Useful to check whether a font and text behave
/// monotonically (see [is_monotonic]) before trusting a faster search.
pub fn probe_candidates<F: FontMetrics, T: Tokenizer + ?Sized>(
    candidates: &[F],
    text: &str,
    tokenizer: &T,
    config: &LayoutConfig,
) -> Vec<CandidateOutcome> {
    let tokens = tokenizer.parse(text);
    candidates
        .iter()
        .map(|font| match evaluate_candidate(font, text, &tokens, config) {
            Ok(lines) => CandidateOutcome::Fits { lines: lines.len() },
            Err(outcome) => outcome,
        })
        .collect()
}

/// Whether pass/fail over a largest-first candidate list is monotonic: once
/// one candidate fits, every smaller one does too. Right padding can break
/// this, since a smaller font may land a break on an awkward boundary.
pub fn is_monotonic(outcomes: &[CandidateOutcome]) -> bool {
    match outcomes.iter().position(CandidateOutcome::fits) {
        Some(first) => outcomes[first..].iter().all(CandidateOutcome::fits),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CharTokenizer, ClassifyingTokenizer};
    use std::cell::Cell;

    /// characters are `size / 2` wide and `size` high
    struct Scaled {
        size: f32,
        measured: Cell<usize>,
    }

    fn scaled(sizes: &[f32]) -> Vec<Scaled> {
        sizes
            .iter()
            .map(|&size| Scaled {
                size,
                measured: Cell::new(0),
            })
            .collect()
    }

    impl FontMetrics for Scaled {
        fn measure(&self, text: &str) -> (Px, Px) {
            self.measured.set(self.measured.get() + 1);
            (
                Px(self.size / 2.0 * text.chars().count() as f32),
                Px(self.size),
            )
        }
    }

    struct CountingTokenizer(Cell<usize>);

    impl Tokenizer for CountingTokenizer {
        fn parse<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
            self.0.set(self.0.get() + 1);
            ClassifyingTokenizer.parse(text)
        }
    }

    #[test]
    fn max_and_min_lines() {
        let config = LayoutConfig::new(Px(100.0), Px(65.0)).with_line_space(Px(10.0));
        assert_eq!(config.max_lines(Px(20.0)), Some(2));
        assert_eq!(config.max_lines(Px(55.0)), Some(1));
        assert_eq!(config.max_lines(Px(56.0)), Some(0));
        assert_eq!(config.min_lines(Px(0.0)), Some(0));
        assert_eq!(config.min_lines(Px(100.0)), Some(1));
        assert_eq!(config.min_lines(Px(100.5)), Some(2));

        let flat = LayoutConfig::new(Px(0.0), Px(10.0));
        assert_eq!(flat.min_lines(Px(1.0)), None);
        assert_eq!(flat.max_lines(Px(0.0)), None);
    }

    #[test]
    fn picks_the_largest_candidate() {
        let fonts = scaled(&[20.0, 15.0, 10.0]);
        let config = LayoutConfig::new(Px(100.0), Px(20.0)).with_right_padding(Px(5.0));
        let fit = find_fitting_font(&fonts, "AB", &ClassifyingTokenizer, &config).expect("fits");
        assert_eq!(fit.index, 0);
        assert_eq!(fit.lines.len(), 1);
        assert_eq!(fit.lines[0].text(), "AB");
    }

    #[test]
    fn ragged_candidates_fall_through_to_smaller_sizes() {
        // at 20, "AB," is 30 wide in a 35 box: 5 of slack
        let fonts = scaled(&[20.0, 14.0]);
        let config = LayoutConfig::new(Px(35.0), Px(40.0)).with_right_padding(Px(4.0));
        let fit = find_fitting_font(&fonts, "AB,CD", &ClassifyingTokenizer, &config).expect("fits");
        assert_eq!(fit.index, 1);
        assert_eq!(
            fit.lines.iter().map(Line::text).collect::<Vec<_>>(),
            vec!["AB,CD"]
        );

        let lenient = config.with_right_padding(Px(5.0));
        let fit = find_fitting_font(&fonts, "AB,CD", &ClassifyingTokenizer, &lenient).expect("fits");
        assert_eq!(fit.index, 0);
        assert_eq!(
            fit.lines.iter().map(Line::text).collect::<Vec<_>>(),
            vec!["AB,", "CD"]
        );
    }

    #[test]
    fn nothing_fits_a_box_shorter_than_a_line() {
        let fonts = scaled(&[30.0, 20.0, 10.0]);
        let config = LayoutConfig::new(Px(500.0), Px(9.0));
        assert_eq!(find_fitting_font(&fonts, "AB", &CharTokenizer, &config), None);
    }

    #[test]
    fn estimate_skips_tokenizing() {
        let fonts = scaled(&[40.0, 30.0]);
        let config = LayoutConfig::new(Px(20.0), Px(30.0));
        let tokenizer = CountingTokenizer(Cell::new(0));
        assert_eq!(find_fitting_font(&fonts, "ABCD", &tokenizer, &config), None);
        assert_eq!(tokenizer.0.get(), 0);
    }

    #[test]
    fn tokenizes_once_across_candidates() {
        // every candidate passes the estimate but fails on line breaking
        let fonts = scaled(&[20.0, 18.0, 16.0]);
        let config = LayoutConfig::new(Px(25.0), Px(200.0)).with_right_padding(Px(0.0));
        let tokenizer = CountingTokenizer(Cell::new(0));
        let fit = find_fitting_font(&fonts, "ABC DE", &tokenizer, &config);
        assert_eq!(fit, None);
        assert_eq!(tokenizer.0.get(), 1);
    }

    #[test]
    fn stops_at_first_fit() {
        let fonts = scaled(&[20.0, 10.0]);
        let config = LayoutConfig::new(Px(100.0), Px(100.0));
        find_fitting_font(&fonts, "hello", &CharTokenizer, &config).expect("fits");
        assert!(fonts[0].measured.get() > 0);
        assert_eq!(fonts[1].measured.get(), 0);
    }

    #[test]
    fn breaking_can_reject_what_the_estimate_allowed() {
        // unbroken "ABCDE" needs 2 of the 2 available lines, but is one token
        let fonts = scaled(&[20.0]);
        let config = LayoutConfig::new(Px(40.0), Px(40.0));
        let outcomes = probe_candidates(&fonts, "ABCDE", &ClassifyingTokenizer, &config);
        assert_eq!(
            outcomes,
            vec![CandidateOutcome::Rejected(BreakError::TokenTooWide {
                width: Px(50.0),
                box_width: Px(40.0),
            })]
        );

        // greedy packing leaves gaps, so 9 characters in a 5 character box need 3 lines
        let wide = LayoutConfig::new(Px(50.0), Px(40.0));
        let outcomes = probe_candidates(&fonts, "AB CDE FG", &ClassifyingTokenizer, &wide);
        assert_eq!(
            outcomes,
            vec![CandidateOutcome::TooManyLines {
                lines: 3,
                max_lines: 2
            }]
        );
    }

    #[test]
    fn probing_reports_every_candidate() {
        let fonts = scaled(&[40.0, 20.0, 10.0]);
        let config = LayoutConfig::new(Px(100.0), Px(25.0));
        let outcomes = probe_candidates(&fonts, "ABCD", &CharTokenizer, &config);
        assert_eq!(
            outcomes,
            vec![
                CandidateOutcome::TooManyLinesEstimate {
                    min_lines: Some(1),
                    max_lines: Some(0)
                },
                CandidateOutcome::Fits { lines: 1 },
                CandidateOutcome::Fits { lines: 1 },
            ]
        );
        assert!(is_monotonic(&outcomes));
    }

    #[test]
    fn monotonicity() {
        let pass = CandidateOutcome::Fits { lines: 1 };
        let fail = CandidateOutcome::Rejected(BreakError::Ragged {
            slack: Px(6.0),
            limit: Px(5.0),
        });
        assert!(is_monotonic(&[]));
        assert!(is_monotonic(&[fail.clone(), fail.clone()]));
        assert!(is_monotonic(&[fail.clone(), pass.clone(), pass.clone()]));
        assert!(!is_monotonic(&[pass.clone(), fail.clone(), pass.clone()]));
        assert!(!is_monotonic(&[fail.clone(), pass, fail]));
    }
}
