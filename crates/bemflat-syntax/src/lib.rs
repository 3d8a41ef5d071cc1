//! Whitespace-preserving CSS syntax tree for the bemflat compiler.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Structural tokens with source spans
//!   - Comments kept as tokens
//!
//! - **Tree**
//!   - Arena of at-rules, rules, declarations and comments addressed by [`NodeId`]
//!   - Detach, insert, replace, move and deep-clone operations
//!
//! - **Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Nested rules and at-rules inside any block
//!   - Formatting metadata ([`Raws`]) for lossless printing
//!
//! - **Printer** and **outdent** utilities
//!
//! # Not Yet Implemented
//!
//! - Value parsing (values are kept as raw text)
//! - Source maps

/// Syntax errors.
pub mod error;
/// Indentation removal.
pub mod outdent;
/// Stylesheet parser.
pub mod parser;
/// Stylesheet printer.
pub mod printer;
/// Structural tokenizer.
pub mod tokenizer;
/// Arena-based stylesheet tree.
pub mod tree;

pub use error::SyntaxError;
pub use outdent::outdent;
pub use parser::CSSParser;
pub use printer::stringify;
pub use tokenizer::{CSSToken, CSSTokenizer, Span, SpannedToken};
pub use tree::{AtRule, Comment, Declaration, Node, NodeId, NodeKind, Raws, Rule, Stylesheet};

/// Parse stylesheet text into a tree.
///
/// # Errors
/// See [`CSSParser::parse_stylesheet`].
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, SyntaxError> {
    CSSParser::new(source).parse_stylesheet()
}
