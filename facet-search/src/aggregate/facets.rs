//! Facet aggregation across the two content queries.
//!
//! Author facets exist only on ArticlePage. Content-type facets come from
//! both queries and are merged by exact name, summing counts in order of
//! first appearance (articles first).

use std::collections::HashMap;

use crate::types::{
    ArticlePageFacets, ExperienceFacets, FacetEntry, FacetSummary, MetadataFacets, RawFacet,
};

/// Merge the facet payloads of both queries into one summary.
///
/// Total: absent payloads, `null` entries and nameless entries are skipped;
/// missing counts contribute 0 and negative counts are clamped to 0.
pub fn merge_facets(
    article: Option<&ArticlePageFacets>,
    experience: Option<&ExperienceFacets>,
) -> FacetSummary {
    let authors: Vec<FacetEntry> = article
        .and_then(|facets| facets.author.as_deref())
        .unwrap_or_default()
        .iter()
        .filter_map(named_entry)
        .collect();

    let article_types = type_facets(article.and_then(|facets| facets.metadata.as_ref()));
    let experience_types = type_facets(experience.and_then(|facets| facets.metadata.as_ref()));

    let mut types: Vec<FacetEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in article_types.chain(experience_types) {
        match positions.get(&entry.name) {
            Some(&index) => {
                let existing = &mut types[index];
                existing.count = existing.count.saturating_add(entry.count);
            }
            None => {
                positions.insert(entry.name.clone(), types.len());
                types.push(entry);
            }
        }
    }

    tracing::debug!(
        authors = authors.len(),
        types = types.len(),
        "merged search facets"
    );

    FacetSummary { authors, types }
}

/// Iterate the named type facets of one payload.
fn type_facets(metadata: Option<&MetadataFacets>) -> impl Iterator<Item = FacetEntry> + '_ {
    metadata
        .and_then(|m| m.types.as_deref())
        .unwrap_or_default()
        .iter()
        .filter_map(named_entry)
}

/// Convert a raw entry, dropping `null` and nameless ones.
fn named_entry(raw: &Option<RawFacet>) -> Option<FacetEntry> {
    let raw = raw.as_ref()?;
    let name = raw.name.as_deref().filter(|name| !name.is_empty())?;
    let count = raw.count.unwrap_or(0).max(0) as u64;
    Some(FacetEntry::new(name, count))
}
