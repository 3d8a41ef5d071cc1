//! Component flattening for bemflat stylesheets.
//!
//! # Scope
//!
//! This crate implements:
//! - **Classification** of the at-rules nested in an `@block`
//!   (`@modifier`, `@state`, `@element`), with their ancestry
//! - **Flattening** into BEM rules: the block's base rule followed by one
//!   rule per state selector, with declarations merged when several sources
//!   target the same selector
//! - **Naming** strategies for CSS selectors and DOM classes, replaceable by
//!   the caller
//! - **Documentation sync** of the topdoc comment preceding a block
//!
//! ```
//! use bemflat_compiler::{CompileOptions, compile_css};
//!
//! let input = "@block Button {\n  color: #333;\n  @state :disabled {\n    opacity: 0.1;\n  }\n}";
//! let output = compile_css(input, &CompileOptions::new()).unwrap();
//! assert_eq!(
//!     output.css,
//!     ".Button {\n  color: #333;\n}\n.Button:disabled, .Button.is-disabled {\n  opacity: 0.1;\n}"
//! );
//! ```

/// Breakdown of a node into block, modifier, state and element.
pub mod breakdown;
/// Walking a component and collecting its nested parts.
pub mod classify;
/// Per-block compilation and the stylesheet driver.
pub mod compile;
mod docs;
/// Compile errors.
pub mod error;
/// At-rule kinds the compiler understands.
pub mod kind;
/// Declaration merging and at-rule to rule conversion.
pub mod merge;
/// Selector and DOM class naming.
pub mod naming;
/// Compile options and the JSON configuration file.
pub mod options;
/// State rules of a block, keyed by selector.
pub mod registry;

pub use breakdown::{Breakdown, resolve_breakdown};
pub use classify::{Classification, NestedPart, classify_component};
pub use compile::{CompileReport, compile_block, compile_stylesheet};
pub use error::CompileError;
pub use kind::ComponentKind;
pub use merge::{convert_at_rule, merge_declarations};
pub use naming::{
    BemNaming, NameDomClass, NameParts, NameSelector, NamingError, StateName, parse_state,
};
pub use options::{CompileOptions, Config};
pub use registry::{StateRegistry, StateRule};

use bemflat_syntax::{SyntaxError, parse_stylesheet};

/// Result of [`compile_css`].
#[derive(Debug)]
pub struct CompiledCss {
    /// The flattened stylesheet text.
    pub css: String,
    /// What happened to each component.
    pub report: CompileReport,
}

/// Parse `source`, compile every component and print the result.
///
/// Components that fail are left as written and listed in the report.
///
/// # Errors
/// Returns a [`SyntaxError`] if `source` does not parse.
pub fn compile_css(source: &str, options: &CompileOptions) -> Result<CompiledCss, SyntaxError> {
    let mut sheet = parse_stylesheet(source)?;
    let report = compile_stylesheet(&mut sheet, options);
    Ok(CompiledCss {
        css: sheet.to_string(),
        report,
    })
}
