//! Typed wrappers for the raw content-query payloads.
//!
//! Each query returns `{ items: [...], facets: {...}, total }`. Items may be
//! `null` in GraphQL lists; a `null` entry carries no content and is not
//! treated as a hit. An entry that is not an object is dropped the same way,
//! so one broken hit never fails the rest of the page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::types::{
    decode_lenient, lenient, ArticlePage, ArticlePageFacets, Experience, ExperienceFacets,
};

/// Items and facets returned by one content query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned, F: DeserializeOwned"))]
pub struct QueryResults<T, F> {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Option<Vec<Option<T>>>,
    #[serde(default, deserialize_with = "lenient")]
    pub facets: Option<F>,
    /// Total hits reported by the CMS (may exceed `items.len()`).
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
}

/// Decode an item list, turning entries that fail to decode into `None`.
fn lenient_items<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<Vec<Option<T>>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| values.into_iter().map(decode_lenient).collect()))
}

/// Results of the ArticlePage query.
pub type ArticlePageResults = QueryResults<ArticlePage, ArticlePageFacets>;

/// Results of the Experience query.
pub type ExperienceResults = QueryResults<Experience, ExperienceFacets>;

impl<T, F> Default for QueryResults<T, F> {
    fn default() -> Self {
        Self {
            items: None,
            facets: None,
            total: None,
        }
    }
}

impl<T, F> QueryResults<T, F>
where
    T: DeserializeOwned,
    F: DeserializeOwned,
{
    /// Decode from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Payload`](crate::SearchError::Payload) when
    /// the JSON is malformed or has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl<T, F> QueryResults<T, F> {
    /// Build results from hits and facets.
    pub fn new(items: Vec<T>, facets: Option<F>) -> Self {
        let total = items.len() as u64;
        Self {
            items: Some(items.into_iter().map(Some).collect()),
            facets,
            total: Some(total),
        }
    }

    /// Split into non-null hits and the facet payload.
    pub fn into_parts(self) -> (Vec<T>, Option<F>) {
        let raw = self.items.unwrap_or_default();
        let raw_len = raw.len();
        let items: Vec<T> = raw.into_iter().flatten().collect();
        if items.len() != raw_len {
            tracing::debug!(
                skipped = raw_len - items.len(),
                "skipped null or malformed entries in query items"
            );
        }
        (items, self.facets)
    }

    /// Number of non-null hits.
    pub fn item_count(&self) -> usize {
        self.items
            .as_ref()
            .map_or(0, |items| items.iter().filter(|i| i.is_some()).count())
    }
}
