//! Topdoc documentation comments for bemflat components.
//!
//! A topdoc comment is a CSS comment whose text starts with `topdoc`,
//! followed by a YAML mapping:
//!
//! ```css
//! /* topdoc
//! name: Button
//! description: a simple button
//! markup: |
//!   {{#each state}}<button class="{{this}}"/>{{/each}}
//! */
//! ```
//!
//! This crate implements:
//! - **Parsing** a comment into a [`DocComponent`]
//! - **Indexing** every topdoc comment of a stylesheet by where it ends ([`DocIndex`])
//! - **Rendering** the `markup` field as a Handlebars template ([`render_markup`])
//! - **Serializing** a component back into comment text ([`DocComponent::serialize`])

/// Documentation records.
pub mod component;
/// Documentation errors.
pub mod error;
/// Stylesheet-wide documentation lookup.
pub mod index;
/// Markup template rendering.
pub mod render;

pub use component::{DocComponent, TOPDOC_MARKER};
pub use error::DocError;
pub use index::DocIndex;
pub use render::render_markup;
