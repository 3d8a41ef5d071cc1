use thiserror::Error;

/// Errors raised while reading, rendering or writing topdoc comments.
#[derive(Debug, Error)]
pub enum DocError {
    /// A comment starting with `topdoc` did not hold a YAML mapping.
    #[error("invalid topdoc comment ending at byte {position}: {message}")]
    InvalidComment {
        /// Source offset just past the comment's closing `*/`.
        position: usize,
        /// What the YAML reader reported.
        message: String,
    },

    /// YAML reading or writing failed.
    #[error("topdoc YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The markup template could not be rendered.
    #[error("failed to render topdoc markup: {0}")]
    Render(Box<handlebars::RenderError>),
}

impl From<handlebars::RenderError> for DocError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Render(Box::new(err))
    }
}
