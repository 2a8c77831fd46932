use std::fmt;
use std::str::FromStr;

/// How a [Token] came to be
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of ASCII letters
    Letters,
    /// A run of ASCII digits
    Digits,
    /// A token with punctuation attached to its end, or a token made of
    /// punctuation that had nothing before it to attach to
    Punctuated,
    /// A single character that belongs to no run (CJK ideographs, whitespace, ...)
    Single,
}

/// An atomic piece of text that is never split across lines. Tokens borrow
/// from the text they were parsed from, and concatenating every token a
/// [Tokenizer] returns reproduces that text exactly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'t> {
    pub text: &'t str,
    pub kind: TokenKind,
}

impl<'t> Token<'t> {
    pub fn new(text: &'t str, kind: TokenKind) -> Token<'t> {
        Token { text, kind }
    }

    pub fn as_str(&self) -> &'t str {
        self.text
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Splits text into [Token]s
pub trait Tokenizer {
    fn parse<'t>(&self, text: &'t str) -> Vec<Token<'t>>;
}

/// Treats every character as its own token, which suits CJK text where any
/// character boundary is a valid line break
#[derive(Debug, Default, Copy, Clone)]
pub struct CharTokenizer;

impl Tokenizer for CharTokenizer {
    fn parse<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        text.char_indices()
            .map(|(i, ch)| Token::new(&text[i..i + ch.len_utf8()], TokenKind::Single))
            .collect()
    }
}

/// Groups runs of ASCII letters and runs of ASCII digits into single tokens,
/// and glues punctuation onto whatever token precedes it so that a line never
/// starts with a comma or a closing bracket. Everything else is a token of
/// its own.
///
/// A run of punctuation all lands on the same preceding token, so `"wait?!"`
/// is a single token rather than `"wait"` followed by `"?!"`.
#[derive(Debug, Default, Copy, Clone)]
pub struct ClassifyingTokenizer;

#[derive(Copy, Clone, PartialEq)]
enum Class {
    Letter,
    Digit,
    Punctuation,
    Other,
}

const CJK_PUNCTUATION: &str = "，。、；：？！“”‘’（）《》〈〉【】「」『』〔〕…—～·\
                               ＂＃％＆＇＊－．／＠［＼］＿｛｝";

fn classify(ch: char) -> Class {
    if ch.is_ascii_alphabetic() {
        Class::Letter
    } else if ch.is_ascii_digit() {
        Class::Digit
    } else if ch.is_ascii_punctuation() || CJK_PUNCTUATION.contains(ch) {
        Class::Punctuation
    } else {
        Class::Other
    }
}

impl Tokenizer for ClassifyingTokenizer {
    fn parse<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        let mut tokens: Vec<Token<'t>> = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((start, ch)) = chars.next() {
            let mut end = start + ch.len_utf8();
            match classify(ch) {
                class @ (Class::Letter | Class::Digit) => {
                    while let Some(&(i, next)) = chars.peek() {
                        if classify(next) != class {
                            break;
                        }
                        end = i + next.len_utf8();
                        chars.next();
                    }
                    let kind = if class == Class::Letter {
                        TokenKind::Letters
                    } else {
                        TokenKind::Digits
                    };
                    tokens.push(Token::new(&text[start..end], kind));
                }
                Class::Punctuation => match tokens.last_mut() {
                    // tokens are contiguous, so the previous token ends right at `start`
                    Some(prev) => {
                        let from = start - prev.text.len();
                        prev.text = &text[from..end];
                        prev.kind = TokenKind::Punctuated;
                    }
                    None => tokens.push(Token::new(&text[start..end], TokenKind::Punctuated)),
                },
                Class::Other => tokens.push(Token::new(&text[start..end], TokenKind::Single)),
            }
        }

        tokens
    }
}

/// Picks a tokenizer by configuration rather than by type
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TokenizerKind {
    /// See [CharTokenizer]
    #[default]
    Chars,
    /// See [ClassifyingTokenizer]
    Classifying,
}

impl Tokenizer for TokenizerKind {
    fn parse<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        match self {
            TokenizerKind::Chars => CharTokenizer.parse(text),
            TokenizerKind::Classifying => ClassifyingTokenizer.parse(text),
        }
    }
}

/// Returned when a tokenizer name isn't recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tokenizer {0:?}, expected \"chars\" or \"classify\"")]
pub struct UnknownTokenizer(pub String);

impl FromStr for TokenizerKind {
    type Err = UnknownTokenizer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chars" | "char" => Ok(TokenizerKind::Chars),
            "classify" | "classifying" => Ok(TokenizerKind::Classifying),
            _ => Err(UnknownTokenizer(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'t>(tokens: &[Token<'t>]) -> Vec<&'t str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn chars_are_single_tokens() {
        let tokens = CharTokenizer.parse("好a 1");
        assert_eq!(texts(&tokens), vec!["好", "a", " ", "1"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Single));
    }

    #[test]
    fn letters_and_digits_form_runs() {
        let tokens = ClassifyingTokenizer.parse("abc123def");
        assert_eq!(texts(&tokens), vec!["abc", "123", "def"]);
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Letters, TokenKind::Digits, TokenKind::Letters]
        );
    }

    #[test]
    fn punctuation_attaches_to_previous_token() {
        let tokens = ClassifyingTokenizer.parse("AB,CD");
        assert_eq!(texts(&tokens), vec!["AB,", "CD"]);
        assert_eq!(tokens[0].kind, TokenKind::Punctuated);
        assert_eq!(tokens[1].kind, TokenKind::Letters);
    }

    #[test]
    fn punctuation_runs_collapse_onto_one_token() {
        let tokens = ClassifyingTokenizer.parse("wait?!... ok");
        assert_eq!(texts(&tokens), vec!["wait?!...", " ", "ok"]);
    }

    #[test]
    fn leading_punctuation_stands_alone_then_grows() {
        let tokens = ClassifyingTokenizer.parse("\"(hi");
        assert_eq!(texts(&tokens), vec!["\"(", "hi"]);
        assert_eq!(tokens[0].kind, TokenKind::Punctuated);
    }

    #[test]
    fn cjk_punctuation_attaches_to_ideographs() {
        let tokens = ClassifyingTokenizer.parse("谋杀，我吧！");
        assert_eq!(texts(&tokens), vec!["谋", "杀，", "我", "吧！"]);
    }

    #[test]
    fn punctuation_attaches_to_whitespace_too() {
        let tokens = ClassifyingTokenizer.parse("a ,b");
        assert_eq!(texts(&tokens), vec!["a", " ,", "b"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(CharTokenizer.parse("").is_empty());
        assert!(ClassifyingTokenizer.parse("").is_empty());
    }

    #[test]
    fn tokenizers_are_lossless() {
        let samples = [
            "This could be a single line text but its too long to fit in one.",
            "谋杀我的完美偶像一二三四五六七八九十",
            "Room 101, floor 3; «quoted» — ok?!",
            "…leading, trailing…",
            "mixed混合text文本123数字",
        ];
        for sample in samples {
            for kind in [TokenizerKind::Chars, TokenizerKind::Classifying] {
                let joined: String = kind.parse(sample).iter().map(|t| t.text).collect();
                assert_eq!(joined, sample, "{kind:?} lost text");
                assert!(kind.parse(sample).iter().all(|t| !t.text.is_empty()));
            }
        }
    }

    #[test]
    fn tokenizer_kind_parses_from_config_strings() {
        assert_eq!("chars".parse::<TokenizerKind>(), Ok(TokenizerKind::Chars));
        assert_eq!(" Classify ".parse::<TokenizerKind>(), Ok(TokenizerKind::Classifying));
        assert_eq!(
            "words".parse::<TokenizerKind>(),
            Err(UnknownTokenizer("words".to_string()))
        );
    }
}
