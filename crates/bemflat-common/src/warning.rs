//! Compiler warnings routed through `tracing`.
//!
//! Provides deduplication so a stylesheet with the same problem in many
//! places reports it once per run. Used by the compiler to report components
//! that failed to compile.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Emit a warning once per unique `(component, message)` pair.
///
/// Returns `true` when the warning was emitted, `false` when it had already
/// been reported.
///
/// # Example
/// ```
/// use bemflat_common::warning::warn_once;
///
/// let _ = warn_once("compiler", "@block Button: invalid state `dis abled`");
/// ```
#[must_use]
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(target: "bemflat", component, "{message}");
    }
    should_emit
}

/// Clear all recorded warnings (call before processing a new stylesheet)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
