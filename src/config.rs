//! Configuration types for the preview search shell.

use facet_search::{
    AggregationConfig, DEFAULT_EXCERPT_LENGTH, PIN_SCORE_THRESHOLD, SearchError, SortOrderKey,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PreviewError, Result};

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cms_preview=info,facet_search=info";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Search ordering and aggregation settings.
    pub search: SearchSettings,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Search ordering and aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Active site base URL; only hits on this domain are pinned.
    pub domain: String,
    /// Sort key used when a request does not name one.
    pub default_sort: SortOrderKey,
    /// Whether semantic weighting is on for this site.
    pub use_semantic_search: bool,
    /// Weight sent as `_semanticWeight`, within `0.0..=1.0`.
    pub semantic_weight: f64,
    /// Minimum score for a same-domain hit to be pinned.
    pub pin_threshold: f64,
    /// Maximum excerpt length in characters.
    pub excerpt_length: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            domain: String::new(),
            default_sort: SortOrderKey::Relevance,
            use_semantic_search: false,
            semantic_weight: 0.5,
            pin_threshold: PIN_SCORE_THRESHOLD,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }
}

impl SearchSettings {
    /// Aggregation settings for the core.
    #[must_use]
    pub fn aggregation(&self) -> AggregationConfig {
        AggregationConfig {
            pin_threshold: self.pin_threshold,
            excerpt_length: self.excerpt_length,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl PreviewConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PreviewError::Config(e.to_string()))
    }

    /// Load from `path` when it exists, otherwise return the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PreviewError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/cms-preview/config.toml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        crate::preview_dirs::config_file()
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `search.semantic_weight` must be finite and within `0.0..=1.0`
    /// - `search.pin_threshold` must be finite and greater than 0
    /// - `search.excerpt_length` must be greater than 0
    pub fn validate(&self) -> Result<()> {
        let weight = self.search.semantic_weight;
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(PreviewError::Config(format!(
                "search.semantic_weight must be within 0.0..=1.0, got {weight}"
            )));
        }
        self.search
            .aggregation()
            .validate()
            .map_err(|e| match e {
                SearchError::Config(message) => PreviewError::Config(format!("search.{message}")),
                other => other.into(),
            })?;
        Ok(())
    }
}
