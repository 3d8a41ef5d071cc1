//! Span-preserving CSS tokenizer module.

/// Token types and source spans.
pub mod token;
/// Tokenizer implementation.
pub mod tokenizer;

pub use token::{CSSToken, Span, SpannedToken};
pub use tokenizer::CSSTokenizer;
