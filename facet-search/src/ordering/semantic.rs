//! Semantic-weight biasing of ordering specs.

use serde::{Deserialize, Serialize};

use crate::types::SortOrderKey;

use super::resolver::{ResolvedOrdering, SortSpecResolver};
use super::spec::OrderingSpec;

/// Per-request semantic search settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticOptions {
    /// The user's search term, if any.
    pub search_term: Option<String>,
    /// Whether semantic biasing is switched on for this site.
    pub enabled: bool,
    /// Weight handed to the CMS as `_semanticWeight`.
    pub weight: f64,
}

/// Annotate `spec` with `weight` when semantic search applies.
///
/// The weight is added only when semantic search is enabled, a non-empty
/// search term is present, and `spec` is not already pure semantic
/// ranking. In every other case an unchanged copy is returned.
pub fn apply_semantic_weight(
    spec: &OrderingSpec,
    search_term: Option<&str>,
    enabled: bool,
    weight: f64,
) -> OrderingSpec {
    let has_term = search_term.is_some_and(|term| !term.is_empty());
    if enabled && has_term && !spec.is_semantic_ranking() {
        spec.with_semantic_weight(weight)
    } else {
        *spec
    }
}

/// Resolve `key` for both content queries and apply semantic weighting.
///
/// This is what the query layer sends to the CMS; it must run before the
/// two content queries execute because ordering is applied server-side.
pub fn resolve_ordering(
    resolver: &SortSpecResolver,
    key: SortOrderKey,
    options: &SemanticOptions,
) -> ResolvedOrdering {
    let base = resolver.resolve(key);
    let term = options.search_term.as_deref();
    tracing::trace!(sort = %key, term = ?term, semantic = options.enabled, "resolving ordering");
    ResolvedOrdering {
        article: apply_semantic_weight(&base.article, term, options.enabled, options.weight),
        experience: apply_semantic_weight(&base.experience, term, options.enabled, options.weight),
    }
}
