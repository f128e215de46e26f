//! Property tests for result merging and facet aggregation.
//!
//! Hits are generated with a unique id stored in their URL path so that each
//! output item can be traced back to its input. The properties checked:
//!
//! 1. **Completeness**: the output is a permutation of the input
//! 2. **Pin precedence**: pinned hits form a prefix, ordered by score
//! 3. **Domain scoping**: hits on another domain are never pinned
//! 4. **Sort order**: the unpinned rest follows the sort key
//! 5. **Facet conservation**: type counts sum across both sources

use std::collections::HashMap;

use facet_search::aggregate::collate::compare_titles;
use facet_search::content::parse_published;
use facet_search::types::{
    ArticlePageFacets, ContentMetadata, ContentUrl, ExperienceFacets, MetadataFacets, RawFacet,
};
use facet_search::{
    merge_facets, merge_results, ArticlePage, Experience, SearchResultItem, SortOrderKey,
    PIN_SCORE_THRESHOLD,
};
use proptest::prelude::*;

const ACTIVE_DOMAIN: &str = "https://x.test";

#[derive(Debug, Clone)]
struct Hit {
    is_article: bool,
    title: String,
    score: f64,
    base: String,
    day: u32,
}

fn hit_strategy() -> impl Strategy<Value = Hit> {
    (
        any::<bool>(),
        prop::sample::select(vec![
            "alpha", "Alpha", "Æble", "beta", "Épée", "epee", "Øresund", "oslo", "Straße",
            "zulu", "",
        ]),
        prop::sample::select(vec![0.0, 1.0, 19_999.0, 20_000.0, 25_000.0, 90_000.0]),
        prop::sample::select(vec![ACTIVE_DOMAIN, "https://y.test"]),
        0u32..28,
    )
        .prop_map(|(is_article, title, score, base, day)| Hit {
            is_article,
            title: title.to_owned(),
            score,
            base: base.to_owned(),
            day,
        })
}

fn metadata(id: usize, hit: &Hit) -> Option<ContentMetadata> {
    Some(ContentMetadata {
        display_name: Some(hit.title.clone()),
        published: Some(format!("2024-02-{:02}T00:00:00Z", hit.day + 1)),
        url: Some(ContentUrl {
            base: Some(hit.base.clone()),
            default: Some(format!("/id/{id}")),
        }),
    })
}

fn split(hits: &[Hit]) -> (Vec<ArticlePage>, Vec<Experience>) {
    let mut articles = Vec::new();
    let mut experiences = Vec::new();
    for (id, hit) in hits.iter().enumerate() {
        if hit.is_article {
            articles.push(ArticlePage {
                score: Some(hit.score),
                metadata: metadata(id, hit),
                heading: Some(hit.title.clone()),
                ..Default::default()
            });
        } else {
            experiences.push(Experience {
                score: Some(hit.score),
                metadata: metadata(id, hit),
                ..Default::default()
            });
        }
    }
    (articles, experiences)
}

/// Input ids in merge order: articles first, then experiences.
fn source_order(hits: &[Hit]) -> Vec<usize> {
    let articles = (0..hits.len()).filter(|&id| hits[id].is_article);
    let experiences = (0..hits.len()).filter(|&id| !hits[id].is_article);
    articles.chain(experiences).collect()
}

fn id_of(item: &SearchResultItem) -> usize {
    item.content()
        .metadata()
        .and_then(|m| m.url.as_ref())
        .and_then(|url| url.default.as_deref())
        .and_then(|path| path.strip_prefix("/id/"))
        .and_then(|id| id.parse().ok())
        .expect("generated hits carry an id")
}

fn is_pinned(hit: &Hit) -> bool {
    hit.score >= PIN_SCORE_THRESHOLD && hit.base == ACTIVE_DOMAIN
}

fn sort_key_strategy() -> impl Strategy<Value = SortOrderKey> {
    prop::sample::select(SortOrderKey::all().to_vec())
}

fn published_millis(hit: &Hit) -> i64 {
    parse_published(&format!("2024-02-{:02}T00:00:00Z", hit.day + 1))
        .map(|date| date.timestamp_millis())
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn output_is_permutation_of_input(
        hits in prop::collection::vec(hit_strategy(), 0..24),
        sort in sort_key_strategy(),
    ) {
        let (articles, experiences) = split(&hits);
        let merged = merge_results(articles, experiences, sort, ACTIVE_DOMAIN);

        let mut ids: Vec<usize> = merged.iter().map(id_of).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..hits.len()).collect::<Vec<_>>());
    }

    #[test]
    fn pinned_hits_lead_in_descending_score(
        hits in prop::collection::vec(hit_strategy(), 0..24),
        sort in sort_key_strategy(),
    ) {
        let (articles, experiences) = split(&hits);
        let merged = merge_results(articles, experiences, sort, ACTIVE_DOMAIN);

        let pinned_count = hits.iter().filter(|hit| is_pinned(hit)).count();
        for (position, item) in merged.iter().enumerate() {
            let hit = &hits[id_of(item)];
            prop_assert_eq!(
                is_pinned(hit),
                position < pinned_count,
                "hit {} at position {} breaks the pinned prefix",
                id_of(item),
                position
            );
        }
        for pair in merged[..pinned_count].windows(2) {
            prop_assert!(pair[0].score() >= pair[1].score());
        }
    }

    #[test]
    fn foreign_domain_hits_are_never_promoted(
        hits in prop::collection::vec(hit_strategy(), 0..24),
    ) {
        let (articles, experiences) = split(&hits);
        let merged = merge_results(articles, experiences, SortOrderKey::DateAsc, "https://nowhere.test");
        let ids: Vec<usize> = merged.iter().map(id_of).collect();

        let mut expected = source_order(&hits);
        expected.sort_by_key(|&id| published_millis(&hits[id]));
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn unpinned_rest_follows_sort_key(
        hits in prop::collection::vec(hit_strategy(), 0..24),
        sort in sort_key_strategy(),
    ) {
        let (articles, experiences) = split(&hits);
        let merged = merge_results(articles, experiences, sort, ACTIVE_DOMAIN);

        let rest: Vec<usize> = merged
            .iter()
            .map(id_of)
            .filter(|&id| !is_pinned(&hits[id]))
            .collect();
        let mut expected: Vec<usize> = source_order(&hits)
            .into_iter()
            .filter(|&id| !is_pinned(&hits[id]))
            .collect();
        match sort {
            SortOrderKey::Relevance | SortOrderKey::Semantic => {}
            SortOrderKey::DateDesc => {
                expected.sort_by_key(|&id| std::cmp::Reverse(published_millis(&hits[id])));
            }
            SortOrderKey::DateAsc => expected.sort_by_key(|&id| published_millis(&hits[id])),
            SortOrderKey::TitleAsc => {
                expected.sort_by(|&a, &b| compare_titles(&hits[a].title, &hits[b].title));
            }
            SortOrderKey::TitleDesc => {
                expected.sort_by(|&a, &b| compare_titles(&hits[b].title, &hits[a].title));
            }
        }
        prop_assert_eq!(rest, expected);
    }

    #[test]
    fn merging_is_deterministic(
        hits in prop::collection::vec(hit_strategy(), 0..16),
        sort in sort_key_strategy(),
    ) {
        let (articles, experiences) = split(&hits);
        let first = merge_results(articles.clone(), experiences.clone(), sort, ACTIVE_DOMAIN);
        let second = merge_results(articles, experiences, sort, ACTIVE_DOMAIN);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn type_facet_counts_are_conserved(
        article_types in prop::collection::vec(("[A-D]", 0i64..50), 0..8),
        experience_types in prop::collection::vec(("[A-D]", 0i64..50), 0..8),
    ) {
        let raw = |entries: &[(String, i64)]| MetadataFacets {
            types: Some(
                entries
                    .iter()
                    .map(|(name, count)| Some(RawFacet { name: Some(name.clone()), count: Some(*count) }))
                    .collect(),
            ),
        };
        let article = ArticlePageFacets { author: None, metadata: Some(raw(&article_types)) };
        let experience = ExperienceFacets { metadata: Some(raw(&experience_types)) };

        let summary = merge_facets(Some(&article), Some(&experience));

        let mut expected: HashMap<String, u64> = HashMap::new();
        for (name, count) in article_types.iter().chain(&experience_types) {
            *expected.entry(name.clone()).or_default() += *count as u64;
        }
        prop_assert_eq!(summary.types.len(), expected.len());
        for entry in &summary.types {
            prop_assert_eq!(Some(&entry.count), expected.get(&entry.name));
        }
    }
}
