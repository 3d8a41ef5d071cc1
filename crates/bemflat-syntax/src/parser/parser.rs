//! Stylesheet parser.
//!
//! Follows the shape of [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing)
//! but builds a lossless tree: every run of whitespace between nodes is kept
//! in the node's [`Raws`] so printing an unmodified tree reproduces the input.
//!
//! Inside a block, a run of tokens that reaches a `{` before a `;` or `}` is a
//! nested rule; otherwise it is a declaration. This lets `@block` bodies mix
//! declarations with nested at-rules and rules.

use crate::error::SyntaxError;
use crate::tokenizer::{CSSToken, CSSTokenizer, Span, SpannedToken};
use crate::tree::{AtRule, Comment, Declaration, NodeId, NodeKind, Raws, Rule, Stylesheet};

/// CSS parser
pub struct CSSParser<'a> {
    source: &'a str,
    tokens: Vec<SpannedToken>,
    position: usize,
    sheet: Stylesheet,
}

impl<'a> CSSParser<'a> {
    /// Create a new parser for `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut tokenizer = CSSTokenizer::new(source);
        tokenizer.run();
        Self {
            source,
            tokens: tokenizer.into_tokens(),
            position: 0,
            sheet: Stylesheet::new(),
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// # Errors
    /// Returns a [`SyntaxError`] for unbalanced braces, unterminated comments
    /// or strings, and words that are neither rules nor declarations.
    pub fn parse_stylesheet(mut self) -> Result<Stylesheet, SyntaxError> {
        let root = self.sheet.root();
        self.consume_list_of_rules(root, None)?;
        Ok(self.sheet)
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// Consumes children of `parent` until its closing `}` (or EOF at the top
    /// level, where `open` is `None`).
    fn consume_list_of_rules(&mut self, parent: NodeId, open: Option<Span>) -> Result<(), SyntaxError> {
        let mut last_terminated = false;

        loop {
            let before_start = self.offset();
            self.skip_insignificant();
            let before = self.source[before_start..self.offset()].to_string();

            match self.peek().clone() {
                CSSToken::EOF => {
                    if let Some(open) = open {
                        return Err(self.unclosed_block(open));
                    }
                    self.finish_container(parent, before, last_terminated);
                    return Ok(());
                }

                CSSToken::RightBrace => {
                    if open.is_none() {
                        let (line, column) = self.location(self.offset());
                        return Err(SyntaxError::UnexpectedCloseBrace { line, column });
                    }
                    let _ = self.consume();
                    self.finish_container(parent, before, last_terminated);
                    return Ok(());
                }

                CSSToken::Comment(text) => {
                    let span = self.consume().span;
                    let node = self.sheet.alloc_with_source(
                        NodeKind::Comment(Comment {
                            text: String::new(),
                        }),
                        Raws {
                            before,
                            ..Raws::default()
                        },
                        Some(span),
                    );
                    self.fill_comment(node, &text);
                    self.sheet.append_child(parent, node);
                }

                CSSToken::BadComment => {
                    let (line, column) = self.location(self.offset());
                    return Err(SyntaxError::UnclosedComment { line, column });
                }

                CSSToken::AtKeyword(name) => {
                    last_terminated = self.consume_at_rule(parent, name, before)?;
                }

                _ => {
                    last_terminated = self.consume_rule_or_declaration(parent, before)?;
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// Returns whether the at-rule was terminated by a semicolon.
    fn consume_at_rule(&mut self, parent: NodeId, name: String, before: String) -> Result<bool, SyntaxError> {
        let start = self.consume().span;

        let name_end = self.offset();
        while self.peek().is_whitespace() {
            let _ = self.consume();
        }
        let params_start = self.offset();
        let after_name = self.source[name_end..params_start].to_string();

        let terminator = self.scan_prelude()?;
        let prelude = &self.source[params_start..self.offset()];
        let params = prelude.trim_end().to_string();
        let trailing = prelude[params.len()..].to_string();

        let (after_name, between) = if params.is_empty() {
            (String::new(), format!("{after_name}{trailing}"))
        } else {
            (after_name, trailing)
        };

        let raws = Raws {
            before,
            between,
            after_name,
            ..Raws::default()
        };

        match terminator {
            CSSToken::LeftBrace => {
                let open = self.consume().span;
                let node = self.sheet.alloc(
                    NodeKind::AtRule(AtRule {
                        name,
                        params,
                        has_body: true,
                    }),
                    raws,
                );
                self.sheet.append_child(parent, node);
                self.consume_list_of_rules(node, Some(open))?;
                self.set_source(node, start.start);
                Ok(false)
            }
            terminator => {
                let terminated = terminator == CSSToken::Semicolon;
                if terminated {
                    let _ = self.consume();
                }
                let node = self.sheet.alloc(
                    NodeKind::AtRule(AtRule {
                        name,
                        params,
                        has_body: false,
                    }),
                    raws,
                );
                self.sheet.append_child(parent, node);
                self.set_source(node, start.start);
                Ok(terminated)
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    /// or [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration),
    /// depending on which terminator comes first.
    ///
    /// Returns whether a declaration was terminated by a semicolon.
    fn consume_rule_or_declaration(&mut self, parent: NodeId, before: String) -> Result<bool, SyntaxError> {
        let start = self.offset();
        let checkpoint = self.position;
        let terminator = self.scan_prelude()?;

        if terminator == CSSToken::LeftBrace {
            let prelude = &self.source[start..self.offset()];
            let selector = prelude.trim_end().to_string();
            let between = prelude[selector.len()..].to_string();

            let open = self.consume().span;
            let node = self.sheet.alloc(
                NodeKind::Rule(Rule { selector }),
                Raws {
                    before,
                    between,
                    ..Raws::default()
                },
            );
            self.sheet.append_child(parent, node);
            self.consume_list_of_rules(node, Some(open))?;
            self.set_source(node, start);
            return Ok(false);
        }

        let end = self.offset();
        let terminator_position = self.position;
        self.position = checkpoint;

        // "If the next input token is anything other than a <colon-token>,
        // this is a parse error. Return nothing."
        let mut colon = None;
        while self.offset() < end {
            let token = self.consume();
            if token.token == CSSToken::Colon {
                colon = Some(token.span);
                break;
            }
        }
        let Some(colon) = colon else {
            let word = self.source[start..end].trim().to_string();
            let (line, column) = self.location(start);
            return Err(SyntaxError::UnknownWord { word, line, column });
        };

        while self.offset() < end && self.peek().is_whitespace() {
            let _ = self.consume();
        }
        let value_start = self.offset();

        let prop = self.source[start..colon.start].trim_end().to_string();
        let between = self.source[start + prop.len()..value_start].to_string();
        let value = self.source[value_start..end].trim_end().to_string();

        self.position = terminator_position;
        let terminated = *self.peek() == CSSToken::Semicolon;
        if terminated {
            let _ = self.consume();
        }

        let node = self.sheet.alloc(
            NodeKind::Declaration(Declaration { prop, value }),
            Raws {
                before,
                between,
                ..Raws::default()
            },
        );
        self.sheet.append_child(parent, node);
        self.set_source(node, start);
        Ok(terminated)
    }

    /// Advance to the first `{`, `;`, `}` or EOF that is not nested inside
    /// parentheses or brackets, without consuming it, and return it.
    fn scan_prelude(&mut self) -> Result<CSSToken, SyntaxError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                CSSToken::EOF => return Ok(CSSToken::EOF),
                CSSToken::LeftBrace | CSSToken::Semicolon | CSSToken::RightBrace if depth == 0 => {
                    return Ok(self.peek().clone());
                }
                CSSToken::LeftParen | CSSToken::LeftBracket => depth += 1,
                CSSToken::RightParen | CSSToken::RightBracket => depth = depth.saturating_sub(1),
                CSSToken::BadString => {
                    let (line, column) = self.location(self.offset());
                    return Err(SyntaxError::UnclosedString { line, column });
                }
                CSSToken::BadComment => {
                    let (line, column) = self.location(self.offset());
                    return Err(SyntaxError::UnclosedComment { line, column });
                }
                _ => {}
            }
            let _ = self.consume();
        }
    }

    /// Skip whitespace and stray semicolons; they end up in the next
    /// node's `before`.
    fn skip_insignificant(&mut self) {
        while matches!(self.peek(), CSSToken::Whitespace | CSSToken::Semicolon) {
            let _ = self.consume();
        }
    }

    fn finish_container(&mut self, node: NodeId, after: String, semicolon: bool) {
        if let Some(raws) = self.sheet.raws_mut(node) {
            raws.after = after;
            raws.semicolon = semicolon;
        }
    }

    fn fill_comment(&mut self, node: NodeId, inner: &str) {
        let text = inner.trim();
        let (left, right) = if text.is_empty() {
            (inner.to_string(), String::new())
        } else {
            let left_len = inner.len() - inner.trim_start().len();
            let right_len = inner.len() - inner.trim_end().len();
            (
                inner[..left_len].to_string(),
                inner[inner.len() - right_len..].to_string(),
            )
        };
        if let Some(n) = self.sheet.get_mut(node) {
            n.raws.left = left;
            n.raws.right = right;
            n.kind = NodeKind::Comment(Comment {
                text: text.to_string(),
            });
        }
    }

    /// Record `start..<end of the last consumed token>` as the node's source.
    fn set_source(&mut self, node: NodeId, start: usize) {
        let end = self
            .position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(start, |t| t.span.end);
        if let Some(n) = self.sheet.get_mut(node) {
            n.source = Some(Span::new(start, end));
        }
    }

    fn unclosed_block(&self, open: Span) -> SyntaxError {
        let (line, column) = self.location(open.start);
        SyntaxError::UnclosedBlock { line, column }
    }

    /// 1-based line and column of a byte offset.
    fn location(&self, offset: usize) -> (usize, usize) {
        let prefix = &self.source[..offset.min(self.source.len())];
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count() + 1;
        (line, column)
    }

    /// The current token; the trailing EOF once the input is exhausted.
    fn current(&self) -> &SpannedToken {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(last)]
    }

    fn peek(&self) -> &CSSToken {
        &self.current().token
    }

    /// Byte offset where the current token starts.
    fn offset(&self) -> usize {
        self.current().span.start
    }

    /// Consume the current token. EOF is never consumed.
    fn consume(&mut self) -> SpannedToken {
        let token = self.current().clone();
        if !token.token.is_eof() {
            self.position += 1;
        }
        token
    }
}
