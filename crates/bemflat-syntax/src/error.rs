//! Syntax errors.

/// An error found while parsing stylesheet text.
///
/// Lines and columns are 1-based; columns count code points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A `{` was never closed.
    #[error("{line}:{column}: unclosed block")]
    UnclosedBlock {
        /// Line of the opening brace.
        line: usize,
        /// Column of the opening brace.
        column: usize,
    },

    /// A `}` appeared at the top level.
    #[error("{line}:{column}: unexpected `}}`")]
    UnexpectedCloseBrace {
        /// Line of the brace.
        line: usize,
        /// Column of the brace.
        column: usize,
    },

    /// A comment reached the end of input.
    #[error("{line}:{column}: unclosed comment")]
    UnclosedComment {
        /// Line where the comment starts.
        line: usize,
        /// Column where the comment starts.
        column: usize,
    },

    /// A string reached a newline or the end of input.
    #[error("{line}:{column}: unclosed string")]
    UnclosedString {
        /// Line where the string starts.
        line: usize,
        /// Column where the string starts.
        column: usize,
    },

    /// Something that is neither a rule nor a `prop: value` declaration.
    #[error("{line}:{column}: unknown word `{word}`")]
    UnknownWord {
        /// The offending text.
        word: String,
        /// Line of the word.
        line: usize,
        /// Column of the word.
        column: usize,
    },
}
