//! Error types for the preview search shell.

use facet_search::SearchError;

/// Top-level error type for the preview search shell.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// Configuration load, parse or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// A request or CMS response failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Error raised by the aggregation core.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Host bridge transport or dispatch error.
    #[error("host error: {0}")]
    Host(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PreviewError>;
