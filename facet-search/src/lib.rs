//! # facet-search
//!
//! Faceted search result aggregation for the CMS preview front end.
//!
//! The CMS is searched with two structurally different content queries,
//! ArticlePage and Experience. This crate decides how each query should be
//! ordered, then merges the two result sets into one list with pinned
//! "best bet" promotion and combined facet counts.
//!
//! ## Design
//!
//! - [`ordering`] runs *before* the queries: a sort key resolves to one
//!   `orderBy` spec per content type, optionally biased by a semantic weight
//! - [`aggregate`](mod@aggregate) runs *after* the queries: tag, merge,
//!   client-side sort, pin-promote, and facet merging
//! - [`content`] gives rendering a uniform view (title, excerpt, image)
//!   over both content types
//! - Every transform is pure and synchronous; missing fields degrade to
//!   defaults instead of failing the request
//!
//! ## Security
//!
//! - No I/O, no network, no shared state
//! - Search terms are logged only at trace level

pub mod aggregate;
pub mod config;
pub mod content;
pub mod error;
pub mod ordering;
pub mod payload;
pub mod types;

pub use aggregate::{merge_facets, merge_results, ResultAggregator, PIN_SCORE_THRESHOLD};
pub use config::AggregationConfig;
pub use content::{ContentAccessors, DEFAULT_EXCERPT_LENGTH};
pub use error::{Result, SearchError};
pub use ordering::{
    apply_semantic_weight, resolve_ordering, OrderingSpec, ResolvedOrdering, SemanticOptions,
    SortSpecResolver, SortTable,
};
pub use payload::{ArticlePageResults, ExperienceResults, QueryResults};
pub use types::{
    ArticlePage, ContentType, ContentVariant, Experience, FacetEntry, FacetSummary,
    SearchResultItem, SortOrderKey,
};

use serde::Serialize;

/// Merged, ordered hits plus facets for one search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    /// Pinned hits first, then the rest in sort-key order.
    pub items: Vec<SearchResultItem>,
    pub facets: FacetSummary,
}

impl SearchResults {
    /// Number of merged hits.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Merge the results of both content queries.
///
/// Tags and merges the hits of `article` and `experience`, applies the
/// client-side comparator for `sort`, promotes hits pinned on `domain`, and
/// merges both facet payloads.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Malformed or
/// missing fields inside the payloads never cause an error.
///
/// # Examples
///
/// ```
/// use facet_search::{aggregate, AggregationConfig, ArticlePageResults, ExperienceResults, SortOrderKey};
///
/// let articles = ArticlePageResults::from_json(r#"{"items":[{"Heading":"Launch","_score":3}]}"#)?;
/// let experiences = ExperienceResults::default();
/// let results = aggregate(
///     articles,
///     experiences,
///     SortOrderKey::Relevance,
///     "https://www.example.com",
///     &AggregationConfig::default(),
/// )?;
/// assert_eq!(results.len(), 1);
/// # Ok::<(), facet_search::SearchError>(())
/// ```
pub fn aggregate(
    article: ArticlePageResults,
    experience: ExperienceResults,
    sort: SortOrderKey,
    domain: &str,
    config: &AggregationConfig,
) -> Result<SearchResults> {
    config.validate()?;

    let (article_items, article_facets) = article.into_parts();
    let (experience_items, experience_facets) = experience.into_parts();

    let facets = merge_facets(article_facets.as_ref(), experience_facets.as_ref());
    let items = ResultAggregator::new(config.pin_threshold).merge(
        article_items,
        experience_items,
        sort,
        domain,
    );

    Ok(SearchResults { items, facets })
}

/// Resolve the `orderBy` specs for both content queries.
///
/// Convenience wrapper around [`resolve_ordering`] using the standard sort
/// tables.
pub fn ordering_for(sort: SortOrderKey, options: &SemanticOptions) -> ResolvedOrdering {
    resolve_ordering(&SortSpecResolver::default(), sort, options)
}
