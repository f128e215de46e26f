//! Core types for CMS search results, sort keys and facets.
//!
//! Field names follow the CMS GraphQL schema (`_score`, `_metadata`,
//! `Heading`, ...) so payloads deserialize without a translation layer.
//! Every field is optional: the CMS omits or nulls fields freely and the
//! aggregation engine degrades to defaults rather than rejecting items. A
//! field holding a value of the wrong type decodes as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Deserialize an optional field, reading a value of the wrong shape as
/// absent instead of failing the enclosing item.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(decode_lenient(value))
}

/// Decode `value` as `T`; `null` or a mismatched shape yields `None`.
pub(crate) fn decode_lenient<T: DeserializeOwned>(value: serde_json::Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed field");
            None
        }
    }
}

/// Which content query an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// Editorial article pages (have a `Heading` and rich-text `Body`).
    ArticlePage,
    /// Visual-builder experiences (no `Heading`; SEO settings instead).
    Experience,
}

impl ContentType {
    /// Returns the CMS type name of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArticlePage => "ArticlePage",
            Self::Experience => "Experience",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical URL of a content item, split the way the CMS reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentUrl {
    /// Site base, e.g. `https://www.example.com`. Used for pin scoping.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Path relative to `base`, e.g. `/en/news/launch/`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// The `_metadata` block shared by every content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(
        rename = "displayName",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    /// Publication timestamp as reported by the CMS (usually RFC 3339).
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<ContentUrl>,
}

/// Rich-text field rendered to HTML by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// URL of a content-reference image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceUrl {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Metadata of a DAM asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    #[serde(
        rename = "displayName",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

/// An image stored in the DAM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamAsset {
    #[serde(
        rename = "Url",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        rename = "AltText",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub alt_text: Option<String>,
    #[serde(
        rename = "_metadata",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<AssetMetadata>,
}

/// An image field that is either a content reference or a DAM asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Content-reference form; preferred when present.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<ReferenceUrl>,
    /// DAM asset form.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub item: Option<DamAsset>,
}

/// SEO settings block attached to experiences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoSettings {
    #[serde(
        rename = "MetaTitle",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta_title: Option<String>,
    #[serde(
        rename = "MetaDescription",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta_description: Option<String>,
    #[serde(
        rename = "SharingImage",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub sharing_image: Option<ImageReference>,
}

/// The `_fulltext` field: normally a list of text fragments, occasionally a
/// single string. List entries may be `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FullText {
    Parts(Vec<Option<String>>),
    Text(String),
}

impl FullText {
    /// Join all non-null fragments with single spaces.
    pub fn joined(&self) -> String {
        match self {
            Self::Parts(parts) => parts
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            Self::Text(text) => text.clone(),
        }
    }
}

/// A raw ArticlePage search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticlePage {
    /// Source-reported relevance score.
    #[serde(
        rename = "_score",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f64>,
    #[serde(
        rename = "_metadata",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<ContentMetadata>,
    #[serde(
        rename = "Heading",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub heading: Option<String>,
    #[serde(
        rename = "Body",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<RichText>,
    #[serde(
        rename = "PromoImage",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub promo_image: Option<ImageReference>,
}

/// A raw Experience search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Source-reported relevance score.
    #[serde(
        rename = "_score",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f64>,
    #[serde(
        rename = "_metadata",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<ContentMetadata>,
    #[serde(
        rename = "BlankExperienceSeoSettings",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub seo: Option<SeoSettings>,
    #[serde(
        rename = "_fulltext",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fulltext: Option<FullText>,
}

/// One of the two heterogeneous content shapes merged into a result list.
///
/// Serialises with a `__contentType` discriminator next to the CMS fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__contentType")]
pub enum ContentVariant {
    ArticlePage(ArticlePage),
    Experience(Experience),
}

impl ContentVariant {
    /// The discriminator of this variant.
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::ArticlePage(_) => ContentType::ArticlePage,
            Self::Experience(_) => ContentType::Experience,
        }
    }

    /// The shared `_metadata` block, if present.
    pub fn metadata(&self) -> Option<&ContentMetadata> {
        match self {
            Self::ArticlePage(article) => article.metadata.as_ref(),
            Self::Experience(experience) => experience.metadata.as_ref(),
        }
    }

    /// Source-reported score; missing or non-finite scores read as `0.0`.
    pub fn score(&self) -> f64 {
        let raw = match self {
            Self::ArticlePage(article) => article.score,
            Self::Experience(experience) => experience.score,
        };
        raw.filter(|s| s.is_finite()).unwrap_or(0.0)
    }

    /// The `_metadata.url.base` of this item.
    pub fn url_base(&self) -> Option<&str> {
        self.metadata()
            .and_then(|m| m.url.as_ref())
            .and_then(|u| u.base.as_deref())
    }
}

/// A merged search hit: a content variant tagged with its source.
///
/// The tag is fixed when the item is built and cannot change afterwards;
/// the item itself is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResultItem {
    content: ContentVariant,
}

impl SearchResultItem {
    /// Tag an ArticlePage hit.
    pub fn article(article: ArticlePage) -> Self {
        Self {
            content: ContentVariant::ArticlePage(article),
        }
    }

    /// Tag an Experience hit.
    pub fn experience(experience: Experience) -> Self {
        Self {
            content: ContentVariant::Experience(experience),
        }
    }

    /// The discriminator assigned at construction.
    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    /// Whether this hit came from the Experience query.
    pub fn is_experience(&self) -> bool {
        self.content_type() == ContentType::Experience
    }

    /// Borrow the tagged content.
    pub fn content(&self) -> &ContentVariant {
        &self.content
    }

    /// Source-reported score (`0.0` when absent).
    pub fn score(&self) -> f64 {
        self.content.score()
    }
}

/// Requested result ordering.
///
/// Parsing never fails: unknown or empty values normalise to
/// [`SortOrderKey::Relevance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum SortOrderKey {
    /// Source relevance ranking.
    #[default]
    Relevance,
    /// Source semantic-similarity ranking.
    Semantic,
    /// Newest first.
    DateDesc,
    /// Oldest first.
    DateAsc,
    /// Title A–Z.
    TitleAsc,
    /// Title Z–A.
    TitleDesc,
}

impl SortOrderKey {
    /// Returns all sort keys in their canonical order.
    pub fn all() -> &'static [SortOrderKey] {
        &[
            Self::Relevance,
            Self::Semantic,
            Self::DateDesc,
            Self::DateAsc,
            Self::TitleAsc,
            Self::TitleDesc,
        ]
    }

    /// Wire name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Semantic => "semantic",
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }

    /// Parse a wire name, normalising anything unrecognised to `Relevance`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "relevance" => Self::Relevance,
            "semantic" => Self::Semantic,
            "date_desc" => Self::DateDesc,
            "date_asc" => Self::DateAsc,
            "title_asc" => Self::TitleAsc,
            "title_desc" => Self::TitleDesc,
            other => {
                tracing::debug!(sort = other, "unknown sort key; using relevance");
                Self::Relevance
            }
        }
    }
}

impl From<String> for SortOrderKey {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for SortOrderKey {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for SortOrderKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for SortOrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A facet value with the number of matching items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetEntry {
    pub name: String,
    pub count: u64,
}

impl FacetEntry {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Facets for the merged result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSummary {
    /// Author facets (ArticlePage only).
    pub authors: Vec<FacetEntry>,
    /// Content-type facets from both sources, counts summed by name.
    pub types: Vec<FacetEntry>,
}

/// A facet entry exactly as the CMS reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFacet {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<i64>,
}

/// The `_metadata` facet block holding content-type counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFacets {
    #[serde(default, deserialize_with = "lenient")]
    pub types: Option<Vec<Option<RawFacet>>>,
}

/// Facet payload of the ArticlePage query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticlePageFacets {
    #[serde(rename = "Author", default, deserialize_with = "lenient")]
    pub author: Option<Vec<Option<RawFacet>>>,
    #[serde(rename = "_metadata", default, deserialize_with = "lenient")]
    pub metadata: Option<MetadataFacets>,
}

/// Facet payload of the Experience query (no author field).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceFacets {
    #[serde(rename = "_metadata", default, deserialize_with = "lenient")]
    pub metadata: Option<MetadataFacets>,
}
