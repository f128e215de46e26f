//! Search pipeline wiring config, requests and CMS responses through the
//! aggregation core.
//!
//! Two entry points match the two phases of a search:
//!
//! - [`SearchPipeline::ordering`] runs before the CMS queries and returns
//!   the `orderBy` values to send with them
//! - [`SearchPipeline::aggregate`] runs once both queries have returned and
//!   produces the merged, rendered result page

use facet_search::{
    ArticlePageResults, ContentAccessors, ContentType, ExperienceResults, FacetSummary,
    QueryResults, SearchResultItem, SortOrderKey, SortSpecResolver, resolve_ordering,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{PreviewConfig, SearchSettings};
use crate::error::Result;
use crate::request::SearchRequest;
use crate::validate::{ARTICLE_PAGE_ROOT, EXPERIENCE_ROOT, validate_search_response};

/// `orderBy` values for both content queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingResponse {
    pub sort: SortOrderKey,
    pub article_order_by: Value,
    pub experience_order_by: Value,
}

/// One hit as the front end renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedItem {
    pub content_type: ContentType,
    pub title: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    /// Gradient classes for the image placeholder.
    pub placeholder: String,
    pub url: Option<String>,
    /// Long-form publication date, e.g. `January 5, 2024`.
    pub date: Option<String>,
    pub score: f64,
}

impl RenderedItem {
    /// Render `item` with excerpts cut at `excerpt_length` characters.
    #[must_use]
    pub fn render(item: &SearchResultItem, excerpt_length: usize) -> Self {
        Self {
            content_type: item.content_type(),
            title: item.title().to_owned(),
            excerpt: item.excerpt(excerpt_length),
            image_url: item.image_url().map(str::to_owned),
            image_alt: item.image_alt().to_owned(),
            placeholder: item.placeholder_style().to_owned(),
            url: item.canonical_url(),
            date: item.formatted_date(),
            score: item.score(),
        }
    }
}

/// A merged, rendered result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<RenderedItem>,
    pub facets: FacetSummary,
    /// Total hits reported by both queries.
    pub total: u64,
}

/// Runs search requests against the aggregation core.
#[derive(Debug, Clone)]
pub struct SearchPipeline {
    settings: SearchSettings,
    resolver: SortSpecResolver,
}

impl SearchPipeline {
    /// Build a pipeline from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Config`](crate::PreviewError::Config) if the
    /// configuration is invalid.
    pub fn from_config(config: &PreviewConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            settings: config.search.clone(),
            resolver: SortSpecResolver::default(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Resolve the `orderBy` values for both queries of `request`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the request parameters are invalid.
    pub fn ordering(&self, request: &SearchRequest) -> Result<OrderingResponse> {
        let resolved = request.resolve(&self.settings)?;
        let ordering = resolve_ordering(&self.resolver, resolved.sort, &resolved.semantic);
        Ok(OrderingResponse {
            sort: resolved.sort,
            article_order_by: ordering.article.to_order_by(),
            experience_order_by: ordering.experience.to_order_by(),
        })
    }

    /// Validate, decode, merge and render both query responses.
    ///
    /// `article_data` and `experience_data` are the GraphQL `data` objects
    /// of the ArticlePage and Experience queries.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the request is invalid or either
    /// response is structurally malformed.
    pub fn aggregate(
        &self,
        request: &SearchRequest,
        article_data: &Value,
        experience_data: &Value,
    ) -> Result<SearchResponse> {
        let resolved = request.resolve(&self.settings)?;
        let article: ArticlePageResults = decode_section(article_data, ARTICLE_PAGE_ROOT)?;
        let experience: ExperienceResults = decode_section(experience_data, EXPERIENCE_ROOT)?;

        let total = reported_total(&article).saturating_add(reported_total(&experience));
        let aggregation = self.settings.aggregation();
        let results = facet_search::aggregate(
            article,
            experience,
            resolved.sort,
            &resolved.domain,
            &aggregation,
        )?;

        let items: Vec<RenderedItem> = results
            .items
            .iter()
            .map(|item| RenderedItem::render(item, aggregation.excerpt_length))
            .collect();

        tracing::info!(
            sort = %resolved.sort,
            items = items.len(),
            total,
            "search aggregated"
        );

        Ok(SearchResponse {
            items,
            facets: results.facets,
            total,
        })
    }
}

/// Validate `data[root]` and decode it.
fn decode_section<T: DeserializeOwned>(data: &Value, root: &str) -> Result<T> {
    let report = validate_search_response(data, root);
    if !report.is_valid() {
        for error in report.errors() {
            tracing::warn!(root, error = %error, "invalid search response");
        }
        report.into_result()?;
    }
    let section = data.get(root).cloned().unwrap_or_default();
    let decoded = serde_json::from_value(section).map_err(facet_search::SearchError::from)?;
    Ok(decoded)
}

/// CMS-reported total, or the number of hits when none was reported.
fn reported_total<T, F>(results: &QueryResults<T, F>) -> u64 {
    results
        .total
        .unwrap_or_else(|| results.item_count() as u64)
}
