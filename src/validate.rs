//! Structural validation of GraphQL search responses.
//!
//! Runs before a response is decoded. Every problem found is collected so
//! the caller can log all of them; the first one is the primary message.

use serde_json::Value;

use crate::error::{PreviewError, Result};

/// Root field of the ArticlePage search query.
pub const ARTICLE_PAGE_ROOT: &str = "ArticlePage";

/// Root field of the Experience search query.
pub const EXPERIENCE_ROOT: &str = "Experience";

/// Outcome of validating one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first problem found, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    /// Every problem found, in discovery order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Convert into a `Result`, using the primary problem as the message.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Validation`] when any problem was found.
    pub fn into_result(self) -> Result<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(primary) => Err(PreviewError::Validation(primary)),
        }
    }

    fn push(&mut self, message: String) {
        self.errors.push(message);
    }
}

/// Validate the `data` object of a search response under `root`.
///
/// Checks that `data[root]` is an object whose `items` is an array of
/// objects or `null`s, whose `facets` (when present) is an object, and
/// whose `total` (when present) is a non-negative integer. An empty
/// `items` array is valid: it means no hits.
#[must_use]
pub fn validate_search_response(data: &Value, root: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(data) = data.as_object() else {
        let message = if data.is_null() {
            "result is null".to_owned()
        } else {
            "result is not an object".to_owned()
        };
        report.push(message);
        return report;
    };

    let section = match data.get(root) {
        None | Some(Value::Null) => {
            report.push(format!("{root} is missing from result"));
            return report;
        }
        Some(Value::Object(section)) => section,
        Some(_) => {
            report.push(format!("{root} is not an object"));
            return report;
        }
    };

    match section.get("items") {
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                if !(item.is_object() || item.is_null()) {
                    report.push(format!("{root}.items[{index}] is not an object"));
                }
            }
        }
        _ => report.push(format!("{root}.items is missing or not an array")),
    }

    match section.get("facets") {
        None | Some(Value::Null) | Some(Value::Object(_)) => {}
        Some(_) => report.push(format!("{root}.facets is not an object")),
    }

    match section.get("total") {
        None | Some(Value::Null) => {}
        Some(total) if total.as_u64().is_some() => {}
        Some(_) => report.push(format!("{root}.total is not a non-negative integer")),
    }

    if !report.is_valid() {
        tracing::debug!(root, errors = report.errors.len(), "search response failed validation");
    }
    report
}
