//! Common utilities for the bemflat compiler.
//!
//! This crate provides shared infrastructure used by all bemflat crates:
//! - **Warning System** - deduplicated warnings routed through `tracing`

pub mod warning;
