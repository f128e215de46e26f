//! Error types for the facet-search crate.
//!
//! Merging and facet aggregation never fail; a bad field degrades to a
//! neutral default instead. Errors only arise when validating configuration
//! or decoding raw CMS payloads from JSON.

/// Errors that can occur while configuring or feeding the aggregation engine.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid aggregation configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A raw CMS payload could not be decoded into typed results.
    #[error("payload error: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

/// Convenience type alias for facet-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
