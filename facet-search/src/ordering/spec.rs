//! Ordering directives sent to the CMS with each content query.
//!
//! An [`OrderingSpec`] renders to the `orderBy` argument the CMS GraphQL
//! API expects, e.g. `{"_ranking":"RELEVANCE"}` or
//! `{"_metadata":{"published":"DESC"}}`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Server-side ranking modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankingMode {
    /// Keyword relevance.
    Relevance,
    /// Semantic similarity.
    Semantic,
}

impl RankingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "RELEVANCE",
            Self::Semantic => "SEMANTIC",
        }
    }
}

/// Sort direction for field orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable fields exposed by the content queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    /// `_metadata.published`
    Published,
    /// `Heading` (ArticlePage only)
    Heading,
    /// `_metadata.displayName`
    DisplayName,
}

/// What the CMS should order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingDirective {
    Ranking(RankingMode),
    Field {
        field: SortField,
        direction: SortDirection,
    },
}

impl OrderingDirective {
    /// Shorthand for a field ordering.
    pub fn field(field: SortField, direction: SortDirection) -> Self {
        Self::Field { field, direction }
    }

    /// Render as a GraphQL `orderBy` object.
    fn to_order_by(self) -> Map<String, Value> {
        let value = match self {
            Self::Ranking(mode) => json!({ "_ranking": mode.as_str() }),
            Self::Field { field, direction } => match field {
                SortField::Published => json!({ "_metadata": { "published": direction.as_str() } }),
                SortField::Heading => json!({ "Heading": direction.as_str() }),
                SortField::DisplayName => {
                    json!({ "_metadata": { "displayName": direction.as_str() } })
                }
            },
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// A per-source ordering request, optionally carrying a semantic weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderingSpec {
    pub directive: OrderingDirective,
    /// Bias toward semantic similarity; `None` when not requested.
    pub semantic_weight: Option<f64>,
}

impl OrderingSpec {
    /// An unweighted spec for `directive`.
    pub fn new(directive: OrderingDirective) -> Self {
        Self {
            directive,
            semantic_weight: None,
        }
    }

    /// Whether this spec is already pure semantic ranking.
    pub fn is_semantic_ranking(&self) -> bool {
        self.directive == OrderingDirective::Ranking(RankingMode::Semantic)
    }

    /// Return a copy of this spec carrying `weight`.
    pub fn with_semantic_weight(&self, weight: f64) -> Self {
        Self {
            directive: self.directive,
            semantic_weight: Some(weight),
        }
    }

    /// Render as the GraphQL `orderBy` argument.
    ///
    /// The semantic weight, when set, is emitted as a top-level
    /// `_semanticWeight` key beside the ordering.
    pub fn to_order_by(&self) -> Value {
        let mut map = self.directive.to_order_by();
        if let Some(weight) = self.semantic_weight {
            map.insert("_semanticWeight".to_owned(), json!(weight));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_renders_ranking_key() {
        let spec = OrderingSpec::new(OrderingDirective::Ranking(RankingMode::Relevance));
        assert_eq!(spec.to_order_by(), json!({ "_ranking": "RELEVANCE" }));
        let spec = OrderingSpec::new(OrderingDirective::Ranking(RankingMode::Semantic));
        assert_eq!(spec.to_order_by(), json!({ "_ranking": "SEMANTIC" }));
    }

    #[test]
    fn published_renders_under_metadata() {
        let spec = OrderingSpec::new(OrderingDirective::field(
            SortField::Published,
            SortDirection::Desc,
        ));
        assert_eq!(
            spec.to_order_by(),
            json!({ "_metadata": { "published": "DESC" } })
        );
    }

    #[test]
    fn heading_and_display_name_render_distinctly() {
        let heading = OrderingSpec::new(OrderingDirective::field(
            SortField::Heading,
            SortDirection::Asc,
        ));
        assert_eq!(heading.to_order_by(), json!({ "Heading": "ASC" }));
        let display = OrderingSpec::new(OrderingDirective::field(
            SortField::DisplayName,
            SortDirection::Desc,
        ));
        assert_eq!(
            display.to_order_by(),
            json!({ "_metadata": { "displayName": "DESC" } })
        );
    }

    #[test]
    fn semantic_weight_added_at_top_level() {
        let spec = OrderingSpec::new(OrderingDirective::Ranking(RankingMode::Relevance))
            .with_semantic_weight(0.75);
        assert_eq!(
            spec.to_order_by(),
            json!({ "_ranking": "RELEVANCE", "_semanticWeight": 0.75 })
        );
    }

    #[test]
    fn with_semantic_weight_leaves_original_untouched() {
        let base = OrderingSpec::new(OrderingDirective::Ranking(RankingMode::Relevance));
        let weighted = base.with_semantic_weight(0.3);
        assert!(base.semantic_weight.is_none());
        assert_eq!(weighted.semantic_weight, Some(0.3));
        assert_eq!(weighted.directive, base.directive);
    }

    #[test]
    fn semantic_ranking_detection() {
        let semantic = OrderingSpec::new(OrderingDirective::Ranking(RankingMode::Semantic));
        assert!(semantic.is_semantic_ranking());
        let date = OrderingSpec::new(OrderingDirective::field(
            SortField::Published,
            SortDirection::Asc,
        ));
        assert!(!date.is_semantic_ranking());
    }
}
