use bemflat_doc::DocError;
use thiserror::Error;

use crate::naming::NamingError;

/// Why a component failed to compile. Every variant names the block; a
/// failed block is left in the stylesheet as written.
#[derive(Debug, Error)]
pub enum CompileError {
    /// An `@block` without a name.
    #[error("@block without a name at byte {position}")]
    EmptyBlockName {
        /// Source offset of the at-rule, 0 for synthesized nodes.
        position: usize,
    },

    /// A `@state` parameter that is not `name` or `:name`.
    #[error("@block {block}: invalid state `{state}`, expected `name` or `:name`")]
    InvalidState {
        /// The block being compiled.
        block: String,
        /// The state as written.
        state: String,
    },

    /// A naming strategy failed.
    #[error("@block {block}: naming failed: {source}")]
    Naming {
        /// The block being compiled.
        block: String,
        /// What the strategy reported.
        #[source]
        source: NamingError,
    },

    /// A topdoc comment could not be read, rendered or written.
    #[error("@block {block}: {source}")]
    Documentation {
        /// The block being compiled.
        block: String,
        /// What went wrong with the documentation.
        #[source]
        source: DocError,
    },
}

impl CompileError {
    /// Name of the block that failed, if it had one.
    #[must_use]
    pub fn block(&self) -> Option<&str> {
        match self {
            Self::EmptyBlockName { .. } => None,
            Self::InvalidState { block, .. }
            | Self::Naming { block, .. }
            | Self::Documentation { block, .. } => Some(block),
        }
    }

    pub(crate) fn naming(block: &str, source: NamingError) -> Self {
        match source {
            NamingError::InvalidState { state } => Self::InvalidState {
                block: block.to_string(),
                state,
            },
            source @ NamingError::Custom(_) => Self::Naming {
                block: block.to_string(),
                source,
            },
        }
    }

    pub(crate) fn documentation(block: &str, source: DocError) -> Self {
        Self::Documentation {
            block: block.to_string(),
            source,
        }
    }
}
