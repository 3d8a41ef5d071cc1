//! Structural CSS tokens.
//!
//! Loosely follows [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization),
//! but keeps comments and whitespace as tokens and collapses everything that
//! does not affect rule structure into [`CSSToken::Word`]. Every token carries
//! the [`Span`] it was read from so the parser can slice raw text (selectors,
//! values, whitespace) straight out of the source.

use core::fmt;

/// Byte range of a token or node in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first code point.
    pub start: usize,
    /// Byte offset one past the last code point.
    pub end: usize,
}

impl Span {
    /// Create a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A structural CSS token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CSSToken {
    /// "`<whitespace-token>`"
    /// "represents one or more whitespace code points"
    Whitespace,

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// A complete `/* ... */` comment. The value is the text between the
    /// delimiters, untrimmed.
    Comment(String),

    /// A comment that reached EOF before its closing `*/`.
    BadComment,

    /// "`<at-keyword-token>`"
    /// "has a value composed of one or more code points, preceded by U+0040 COMMERCIAL AT (@)"
    AtKeyword(String),

    /// "`<string-token>`"
    /// The value is the raw text between the quotes.
    String(String),

    /// "`<bad-string-token>`"
    /// "represents a parsing error"
    BadString,

    /// "`<colon-token>`"
    Colon,

    /// "`<semicolon-token>`"
    Semicolon,

    /// `<{-token>`
    LeftBrace,

    /// `<}-token>`
    RightBrace,

    /// `<(-token>`
    LeftParen,

    /// `<)-token>`
    RightParen,

    /// `<[-token>`
    LeftBracket,

    /// `<]-token>`
    RightBracket,

    /// A run of code points with no structural meaning (idents, numbers,
    /// hashes, delimiters). Escapes are kept verbatim.
    Word(String),

    /// End of file - signals end of input
    EOF,
}

impl CSSToken {
    /// Create a new word token.
    #[must_use]
    pub fn word(value: impl Into<String>) -> Self {
        Self::Word(value.into())
    }

    /// Create a new at-keyword token.
    #[must_use]
    pub fn at_keyword(value: impl Into<String>) -> Self {
        Self::AtKeyword(value.into())
    }

    /// Check if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Check if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Whether this token only carries layout (whitespace or a comment).
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment(_))
    }
}

impl fmt::Display for CSSToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => write!(f, " "),
            Self::Comment(text) => write!(f, "/*{text}*/"),
            Self::BadComment => write!(f, "/*"),
            Self::AtKeyword(name) => write!(f, "@{name}"),
            Self::String(value) => write!(f, "\"{value}\""),
            Self::BadString => write!(f, "\""),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::Word(word) => write!(f, "{word}"),
            Self::EOF => Ok(()),
        }
    }
}

/// A token together with the source range it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    /// The token.
    pub token: CSSToken,
    /// Where it came from.
    pub span: Span,
}
