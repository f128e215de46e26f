//! CMS preview search shell.
//!
//! Wraps the [`facet_search`] aggregation core for the preview front end:
//!
//! - **Config**: TOML settings for domain, default sort and semantic search
//! - **Request**: per-request overrides, validated against the config
//! - **Validation**: structural checks on GraphQL search responses
//! - **Pipeline**: ordering before the CMS queries, aggregation after
//! - **Host**: newline-delimited JSON bridge used by the `cms-preview-host`
//!   binary

pub mod config;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod preview_dirs;
pub mod request;
pub mod validate;

pub use config::PreviewConfig;
pub use error::{PreviewError, Result};
pub use pipeline::{SearchPipeline, SearchResponse};
pub use request::SearchRequest;
