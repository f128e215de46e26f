//! Merge ArticlePage and Experience hits into one ordered result list.
//!
//! # Pipeline
//!
//! 1. Tag every hit with its content type; articles first, then experiences.
//! 2. For date and title keys, stable-sort the merged list client-side.
//!    Relevance and semantic keys keep source order: each source already
//!    ranked its own hits and the two score scales are not comparable.
//! 3. Split into pinned hits (score ≥ threshold on the active domain) and
//!    the rest.
//! 4. Order pinned hits by descending score.
//! 5. Return pinned hits followed by the rest.
//!
//! High-score hits whose URL base is a different domain are not pinned;
//! they stay in the rest partition in sort-key order. No hit is dropped.

use std::cmp::Reverse;

use crate::content::ContentAccessors;
use crate::types::{ArticlePage, ContentVariant, Experience, SearchResultItem, SortOrderKey};

use super::collate::TitleKey;

/// Score at or above which a same-domain hit is promoted as a best bet.
pub const PIN_SCORE_THRESHOLD: f64 = 20_000.0;

/// Merges the two content sources and applies pinned-result promotion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultAggregator {
    pin_threshold: f64,
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new(PIN_SCORE_THRESHOLD)
    }
}

impl ResultAggregator {
    pub fn new(pin_threshold: f64) -> Self {
        Self { pin_threshold }
    }

    pub fn pin_threshold(&self) -> f64 {
        self.pin_threshold
    }

    /// Whether `item` is a pinned result for `domain`.
    pub fn is_pinned(&self, item: &SearchResultItem, domain: &str) -> bool {
        item.score() >= self.pin_threshold && item.content().url_base() == Some(domain)
    }

    /// Merge, sort and pin-promote both sources.
    ///
    /// Every input hit appears exactly once in the output. Never fails.
    pub fn merge(
        &self,
        articles: Vec<ArticlePage>,
        experiences: Vec<Experience>,
        sort: SortOrderKey,
        domain: &str,
    ) -> Vec<SearchResultItem> {
        let article_count = articles.len();
        let experience_count = experiences.len();

        let mut items: Vec<SearchResultItem> = articles
            .into_iter()
            .map(SearchResultItem::article)
            .chain(experiences.into_iter().map(SearchResultItem::experience))
            .collect();

        sort_client_side(&mut items, sort);

        let (mut pinned, rest): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|item| self.is_pinned(item, domain));

        pinned.sort_by(|a, b| b.score().total_cmp(&a.score()));

        tracing::debug!(
            %sort,
            articles = article_count,
            experiences = experience_count,
            pinned = pinned.len(),
            "merged search results"
        );

        pinned.extend(rest);
        pinned
    }
}

/// Merge with the default pin threshold.
pub fn merge_results(
    articles: Vec<ArticlePage>,
    experiences: Vec<Experience>,
    sort: SortOrderKey,
    domain: &str,
) -> Vec<SearchResultItem> {
    ResultAggregator::default().merge(articles, experiences, sort, domain)
}

/// Apply the client-side comparator for `sort`, if it has one.
///
/// Relevance and semantic ranking happen per source inside the CMS and the
/// two sources do not share a score space, so their order is kept.
fn sort_client_side(items: &mut [SearchResultItem], sort: SortOrderKey) {
    match sort {
        SortOrderKey::Relevance | SortOrderKey::Semantic => {}
        SortOrderKey::DateDesc => {
            items.sort_by_cached_key(|item| Reverse(published_millis(item)));
        }
        SortOrderKey::DateAsc => items.sort_by_cached_key(published_millis),
        SortOrderKey::TitleAsc => {
            items.sort_by_cached_key(|item| TitleKey::new(sort_title(item)));
        }
        SortOrderKey::TitleDesc => {
            items.sort_by_cached_key(|item| Reverse(TitleKey::new(sort_title(item))));
        }
    }
}

/// Publication time in epoch milliseconds; missing or unparsable dates
/// count as the epoch itself.
fn published_millis(item: &SearchResultItem) -> i64 {
    item.published_at()
        .map(|date| date.timestamp_millis())
        .unwrap_or(0)
}

/// Title used for client-side title sorting.
///
/// Mirrors the server-side sort fields: `Heading` then `displayName` for
/// articles, `displayName` only for experiences. Unlike
/// [`ContentAccessors::title`] there is no `"Untitled"` fallback.
fn sort_title(item: &SearchResultItem) -> &str {
    let display_name = item
        .content()
        .metadata()
        .and_then(|m| m.display_name.as_deref())
        .filter(|name| !name.is_empty());
    match item.content() {
        ContentVariant::ArticlePage(article) => article
            .heading
            .as_deref()
            .filter(|heading| !heading.is_empty())
            .or(display_name)
            .unwrap_or_default(),
        ContentVariant::Experience(_) => display_name.unwrap_or_default(),
    }
}
