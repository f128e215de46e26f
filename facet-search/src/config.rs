//! Aggregation configuration with sensible defaults.
//!
//! [`AggregationConfig`] controls pinned-result promotion and excerpt
//! length. The defaults match the CMS "best bet" convention.

use serde::{Deserialize, Serialize};

use crate::aggregate::merge::PIN_SCORE_THRESHOLD;
use crate::content::DEFAULT_EXCERPT_LENGTH;
use crate::error::SearchError;

/// Configuration for the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Minimum score for a same-domain hit to be pinned to the top.
    pub pin_threshold: f64,
    /// Maximum excerpt length in characters.
    pub excerpt_length: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            pin_threshold: PIN_SCORE_THRESHOLD,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }
}

impl AggregationConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `pin_threshold` must be finite and greater than 0
    /// - `excerpt_length` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.pin_threshold.is_finite() || self.pin_threshold <= 0.0 {
            return Err(SearchError::Config(
                "pin_threshold must be a finite number greater than 0".into(),
            ));
        }
        if self.excerpt_length == 0 {
            return Err(SearchError::Config(
                "excerpt_length must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
