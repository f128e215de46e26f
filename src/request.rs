//! Search request parameters as sent by the front end.
//!
//! Every field is optional; absent fields take the value configured in
//! [`SearchSettings`]. [`SearchRequest::resolve`] validates the overrides
//! and produces the settings the core needs.

use facet_search::{SemanticOptions, SortOrderKey};
use serde::{Deserialize, Serialize};

use crate::config::SearchSettings;
use crate::error::{PreviewError, Result};

/// Raw search parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Sort key wire name, e.g. `"date_desc"`. Case and surrounding
    /// whitespace are ignored; unknown names mean relevance.
    pub sort: Option<String>,
    /// The user's search term.
    pub search_term: Option<String>,
    pub use_semantic_search: Option<bool>,
    pub semantic_weight: Option<f64>,
    /// Active site base URL for pinned-result scoping.
    pub domain: Option<String>,
}

/// A request with config defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub sort: SortOrderKey,
    pub semantic: SemanticOptions,
    pub domain: String,
}

impl SearchRequest {
    /// Apply `settings` to every absent field and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Validation`] when the semantic weight is not
    /// finite or lies outside `0.0..=1.0`.
    pub fn resolve(&self, settings: &SearchSettings) -> Result<ResolvedRequest> {
        let sort = self
            .sort
            .as_deref()
            .map(normalize_sort)
            .unwrap_or(settings.default_sort);

        let weight = self.semantic_weight.unwrap_or(settings.semantic_weight);
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(PreviewError::Validation(format!(
                "semantic_weight must be within 0.0..=1.0, got {weight}"
            )));
        }

        let domain = self
            .domain
            .clone()
            .unwrap_or_else(|| settings.domain.clone());

        Ok(ResolvedRequest {
            sort,
            semantic: SemanticOptions {
                search_term: self.search_term.clone(),
                enabled: self
                    .use_semantic_search
                    .unwrap_or(settings.use_semantic_search),
                weight,
            },
            domain,
        })
    }
}

/// Parse a sort key, ignoring case and surrounding whitespace.
fn normalize_sort(raw: &str) -> SortOrderKey {
    SortOrderKey::parse(&raw.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_settings() -> SearchSettings {
        SearchSettings {
            domain: "https://www.example.com".into(),
            default_sort: SortOrderKey::DateDesc,
            use_semantic_search: true,
            semantic_weight: 0.3,
            ..Default::default()
        }
    }

    #[test]
    fn empty_request_takes_settings() {
        let resolved = SearchRequest::default()
            .resolve(&make_settings())
            .expect("resolve");
        assert_eq!(resolved.sort, SortOrderKey::DateDesc);
        assert_eq!(resolved.domain, "https://www.example.com");
        assert!(resolved.semantic.enabled);
        assert!((resolved.semantic.weight - 0.3).abs() < f64::EPSILON);
        assert!(resolved.semantic.search_term.is_none());
    }

    #[test]
    fn request_fields_override_settings() {
        let request = SearchRequest {
            sort: Some("title_asc".into()),
            search_term: Some("pricing".into()),
            use_semantic_search: Some(false),
            semantic_weight: Some(0.9),
            domain: Some("https://other.example.com".into()),
        };
        let resolved = request.resolve(&make_settings()).expect("resolve");
        assert_eq!(resolved.sort, SortOrderKey::TitleAsc);
        assert_eq!(resolved.domain, "https://other.example.com");
        assert!(!resolved.semantic.enabled);
        assert_eq!(resolved.semantic.search_term.as_deref(), Some("pricing"));
        assert!((resolved.semantic.weight - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn sort_is_normalized() {
        let request = SearchRequest {
            sort: Some("  Date_ASC ".into()),
            ..Default::default()
        };
        let resolved = request.resolve(&make_settings()).expect("resolve");
        assert_eq!(resolved.sort, SortOrderKey::DateAsc);
    }

    #[test]
    fn unknown_sort_means_relevance_not_default() {
        let request = SearchRequest {
            sort: Some("popularity".into()),
            ..Default::default()
        };
        let resolved = request.resolve(&make_settings()).expect("resolve");
        assert_eq!(resolved.sort, SortOrderKey::Relevance);
    }

    #[test]
    fn out_of_range_weight_rejected() {
        let request = SearchRequest {
            semantic_weight: Some(-0.1),
            ..Default::default()
        };
        let err = request.resolve(&make_settings()).unwrap_err();
        assert!(matches!(err, PreviewError::Validation(_)));
    }

    #[test]
    fn deserializes_from_partial_json() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"search_term": "launch"}"#).expect("deserialize");
        assert_eq!(request.search_term.as_deref(), Some("launch"));
        assert!(request.sort.is_none());
    }
}
