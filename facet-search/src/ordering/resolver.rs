//! Sort-key → ordering resolution for the two content queries.
//!
//! ArticlePage and Experience expose different sortable fields (only
//! ArticlePage has `Heading`), so each content type gets its own
//! [`SortTable`]. Tables are plain values handed to [`SortSpecResolver`] at
//! construction and never change afterwards.

use std::collections::HashMap;

use crate::types::SortOrderKey;

use super::spec::{OrderingDirective, OrderingSpec, RankingMode, SortDirection, SortField};

/// Fixed mapping from sort key to ordering directive for one content type.
#[derive(Debug, Clone, PartialEq)]
pub struct SortTable {
    entries: HashMap<SortOrderKey, OrderingDirective>,
}

impl SortTable {
    /// Build a table from explicit entries.
    pub fn new(entries: impl IntoIterator<Item = (SortOrderKey, OrderingDirective)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Standard table for ArticlePage: titles sort on `Heading`.
    pub fn article_page() -> Self {
        Self::with_title_field(SortField::Heading)
    }

    /// Standard table for Experience: titles sort on `_metadata.displayName`.
    pub fn experience() -> Self {
        Self::with_title_field(SortField::DisplayName)
    }

    fn with_title_field(title: SortField) -> Self {
        Self::new([
            (
                SortOrderKey::Relevance,
                OrderingDirective::Ranking(RankingMode::Relevance),
            ),
            (
                SortOrderKey::Semantic,
                OrderingDirective::Ranking(RankingMode::Semantic),
            ),
            (
                SortOrderKey::DateDesc,
                OrderingDirective::field(SortField::Published, SortDirection::Desc),
            ),
            (
                SortOrderKey::DateAsc,
                OrderingDirective::field(SortField::Published, SortDirection::Asc),
            ),
            (
                SortOrderKey::TitleAsc,
                OrderingDirective::field(title, SortDirection::Asc),
            ),
            (
                SortOrderKey::TitleDesc,
                OrderingDirective::field(title, SortDirection::Desc),
            ),
        ])
    }

    /// Look up `key`, falling back to the table's relevance entry, then to
    /// plain relevance ranking.
    pub fn lookup(&self, key: SortOrderKey) -> OrderingDirective {
        self.entries
            .get(&key)
            .or_else(|| self.entries.get(&SortOrderKey::Relevance))
            .copied()
            .unwrap_or(OrderingDirective::Ranking(RankingMode::Relevance))
    }

    /// Number of keys with an explicit entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Orderings for both content queries of one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOrdering {
    pub article: OrderingSpec,
    pub experience: OrderingSpec,
}

/// Resolves a [`SortOrderKey`] into per-content-type ordering specs.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpecResolver {
    article: SortTable,
    experience: SortTable,
}

impl Default for SortSpecResolver {
    fn default() -> Self {
        Self::new(SortTable::article_page(), SortTable::experience())
    }
}

impl SortSpecResolver {
    pub fn new(article: SortTable, experience: SortTable) -> Self {
        Self {
            article,
            experience,
        }
    }

    /// Resolve `key` against both tables. Pure; never fails.
    pub fn resolve(&self, key: SortOrderKey) -> ResolvedOrdering {
        ResolvedOrdering {
            article: OrderingSpec::new(self.article.lookup(key)),
            experience: OrderingSpec::new(self.experience.lookup(key)),
        }
    }
}
