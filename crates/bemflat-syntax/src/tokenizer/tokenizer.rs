use super::token::{CSSToken, Span, SpannedToken};

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// Structural CSS tokenizer. Produces a token stream that, concatenated span
/// by span, covers the whole input with no gaps.
pub struct CSSTokenizer {
    /// The input code points with their byte offsets
    input: Vec<(usize, char)>,
    /// Byte length of the input
    input_len: usize,
    /// Current position in `input`
    position: usize,
    /// Collected tokens
    tokens: Vec<SpannedToken>,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer with the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.char_indices().collect(),
            input_len: input.len(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Consume tokens until EOF. The last collected token is always
    /// [`CSSToken::EOF`].
    pub fn run(&mut self) {
        loop {
            let start = self.offset();
            let token = self.consume_token();
            let is_eof = token.is_eof();
            let span = Span::new(start, self.offset());
            self.tokens.push(SpannedToken { token, span });
            if is_eof {
                break;
            }
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<SpannedToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> CSSToken {
        let Some(c) = self.consume() else {
            return CSSToken::EOF;
        };

        match c {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                self.consume_whitespace();
                CSSToken::Whitespace
            }

            // Comments are tokens here: their text and position matter to
            // documentation blocks and to round-tripping.
            '/' if self.peek() == Some('*') => {
                let _ = self.consume();
                self.consume_comment()
            }

            // "U+0022 QUOTATION MARK (")" / "U+0027 APOSTROPHE (')"
            // "Consume a string token and return it."
            '"' | '\'' => self.consume_string_token(c),

            // "U+0040 COMMERCIAL AT (@)"
            '@' => {
                if self.peek().is_some_and(is_ident_code_point) {
                    CSSToken::AtKeyword(self.consume_name())
                } else {
                    self.consume_word('@')
                }
            }

            ':' => CSSToken::Colon,
            ';' => CSSToken::Semicolon,
            '{' => CSSToken::LeftBrace,
            '}' => CSSToken::RightBrace,
            '(' => CSSToken::LeftParen,
            ')' => CSSToken::RightParen,
            '[' => CSSToken::LeftBracket,
            ']' => CSSToken::RightBracket,

            // "anything else"
            c => self.consume_word(c),
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Called with the opening `/*` already consumed.
    fn consume_comment(&mut self) -> CSSToken {
        let mut text = String::new();
        loop {
            match self.consume() {
                Some('*') if self.peek() == Some('/') => {
                    let _ = self.consume(); // /
                    return CSSToken::Comment(text);
                }
                Some(c) => text.push(c),
                None => return CSSToken::BadComment,
            }
        }
    }

    /// Consume whitespace characters.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Escapes are kept verbatim; only their extent matters here.
    fn consume_string_token(&mut self, ending_code_point: char) -> CSSToken {
        let mut value = String::new();

        loop {
            match self.consume() {
                // "ending code point"
                Some(c) if c == ending_code_point => return CSSToken::String(value),

                // "EOF" / "newline"
                // "This is a parse error."
                None => return CSSToken::BadString,
                Some('\n') => {
                    self.reconsume();
                    return CSSToken::BadString;
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => {
                    value.push('\\');
                    if let Some(escaped) = self.consume() {
                        value.push(escaped);
                    }
                }

                Some(c) => value.push(c),
            }
        }
    }

    /// Consume the name of an at-keyword.
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_ident_code_point(c) {
                name.push(c);
                let _ = self.consume();
            } else if c == '\\' {
                name.push(c);
                let _ = self.consume();
                if let Some(escaped) = self.consume() {
                    name.push(escaped);
                }
            } else {
                break;
            }
        }
        name
    }

    /// Consume a run of code points that carry no structure, starting with
    /// the already-consumed `first`.
    fn consume_word(&mut self, first: char) -> CSSToken {
        let mut word = String::from(first);
        if first == '\\'
            && let Some(escaped) = self.consume()
        {
            word.push(escaped);
        }
        while let Some(c) = self.peek() {
            if is_word_boundary(c) || (c == '/' && self.peek_at(1) == Some('*')) {
                break;
            }
            word.push(c);
            let _ = self.consume();
            if c == '\\'
                && let Some(escaped) = self.consume()
            {
                word.push(escaped);
            }
        }
        CSSToken::Word(word)
    }

    /// Byte offset of the next code point.
    fn offset(&self) -> usize {
        self.input
            .get(self.position)
            .map_or(self.input_len, |&(offset, _)| offset)
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Put back the last consumed character.
    fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at a character at an offset from current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).map(|&(_, c)| c)
    }
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
fn is_ident_code_point(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

/// Code points that end a [`CSSToken::Word`].
fn is_word_boundary(c: char) -> bool {
    is_whitespace(c)
        || matches!(
            c,
            '"' | '\'' | ':' | ';' | '{' | '}' | '(' | ')' | '[' | ']' | '@'
        )
}
