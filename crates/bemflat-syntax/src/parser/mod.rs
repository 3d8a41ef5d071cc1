//! Stylesheet parser module.

/// Structural parser building a [`Stylesheet`](crate::Stylesheet) tree.
pub mod parser;

pub use parser::CSSParser;
