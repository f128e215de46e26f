//! Uniform read access to heterogeneous search hits.
//!
//! ArticlePage and Experience keep their title, excerpt and image in
//! different fields. [`ContentAccessors`] hides that behind one view for
//! rendering; each accessor falls back through the variant's sources and
//! ends on a neutral default rather than failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use url::Url;

use crate::types::{
    ArticlePage, ContentMetadata, ContentVariant, Experience, ImageReference, SearchResultItem,
};

/// Default maximum excerpt length in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// Title used when an item has no usable title field.
pub const UNTITLED: &str = "Untitled";

/// Marker appended to truncated excerpts.
const ELLIPSIS: &str = "...";

/// Gradient classes for image-less result cards, indexed by title hash.
pub const PLACEHOLDER_GRADIENTS: [&str; 8] = [
    "bg-gradient-to-br from-primary/20 to-secondary/20",
    "bg-gradient-to-br from-accent/20 to-primary/20",
    "bg-gradient-to-br from-secondary/20 to-accent/20",
    "bg-gradient-to-br from-info/20 to-primary/20",
    "bg-gradient-to-br from-success/20 to-secondary/20",
    "bg-gradient-to-br from-primary/20 to-accent/20",
    "bg-gradient-to-br from-secondary/20 to-info/20",
    "bg-gradient-to-br from-accent/20 to-success/20",
];

/// Read-only view over a search hit, whatever its content type.
pub trait ContentAccessors {
    /// Display title; never empty.
    fn title(&self) -> &str;

    /// Plain-text summary of at most `max_length` characters plus `"..."`
    /// when cut.
    fn excerpt(&self, max_length: usize) -> String;

    /// Promo/sharing image URL, content reference preferred over DAM asset.
    fn image_url(&self) -> Option<&str>;

    /// Alt text for [`image_url`](Self::image_url), falling back to the title.
    fn image_alt(&self) -> &str;

    /// The `_metadata` block, if the CMS sent one.
    fn metadata(&self) -> Option<&ContentMetadata>;

    /// Absolute URL built from `_metadata.url.base` and its path.
    fn canonical_url(&self) -> Option<String> {
        let url = self.metadata()?.url.as_ref()?;
        let base = present(url.base.as_deref());
        let path = present(url.default.as_deref());
        match (base, path) {
            (Some(base), Some(path)) => Some(join_url(base, path)),
            (Some(base), None) => Some(base.to_owned()),
            (None, Some(path)) => Some(path.to_owned()),
            (None, None) => None,
        }
    }

    /// Parsed publication timestamp.
    fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.metadata()?.published.as_deref()?;
        parse_published(raw)
    }

    /// Publication date in long English form, e.g. `January 5, 2024`.
    fn formatted_date(&self) -> Option<String> {
        self.published_at()
            .map(|date| date.format("%B %-d, %Y").to_string())
    }

    /// Placeholder gradient class derived from the title.
    fn placeholder_style(&self) -> &'static str {
        placeholder_gradient(self.title())
    }
}

impl ContentAccessors for ArticlePage {
    fn title(&self) -> &str {
        present(self.heading.as_deref())
            .or_else(|| display_name(self.metadata.as_ref()))
            .unwrap_or(UNTITLED)
    }

    fn excerpt(&self, max_length: usize) -> String {
        match self.body.as_ref().and_then(|b| present(b.html.as_deref())) {
            Some(html) => excerpt_from_markup(html, max_length),
            None => String::new(),
        }
    }

    fn image_url(&self) -> Option<&str> {
        image_source(self.promo_image.as_ref())
    }

    fn image_alt(&self) -> &str {
        image_alt_text(self.promo_image.as_ref()).unwrap_or_else(|| self.title())
    }

    fn metadata(&self) -> Option<&ContentMetadata> {
        self.metadata.as_ref()
    }
}

impl ContentAccessors for Experience {
    fn title(&self) -> &str {
        self.seo
            .as_ref()
            .and_then(|seo| present(seo.meta_title.as_deref()))
            .or_else(|| display_name(self.metadata.as_ref()))
            .unwrap_or(UNTITLED)
    }

    /// SEO meta description verbatim, else the joined full text.
    fn excerpt(&self, max_length: usize) -> String {
        if let Some(description) = self
            .seo
            .as_ref()
            .and_then(|seo| present(seo.meta_description.as_deref()))
        {
            return description.to_owned();
        }
        let fulltext = self
            .fulltext
            .as_ref()
            .map(|text| text.joined())
            .unwrap_or_default();
        excerpt_from_markup(&fulltext, max_length)
    }

    fn image_url(&self) -> Option<&str> {
        image_source(self.seo.as_ref().and_then(|seo| seo.sharing_image.as_ref()))
    }

    fn image_alt(&self) -> &str {
        image_alt_text(self.seo.as_ref().and_then(|seo| seo.sharing_image.as_ref()))
            .unwrap_or_else(|| self.title())
    }

    fn metadata(&self) -> Option<&ContentMetadata> {
        self.metadata.as_ref()
    }
}

impl ContentAccessors for ContentVariant {
    fn title(&self) -> &str {
        match self {
            Self::ArticlePage(article) => article.title(),
            Self::Experience(experience) => experience.title(),
        }
    }

    fn excerpt(&self, max_length: usize) -> String {
        match self {
            Self::ArticlePage(article) => article.excerpt(max_length),
            Self::Experience(experience) => experience.excerpt(max_length),
        }
    }

    fn image_url(&self) -> Option<&str> {
        match self {
            Self::ArticlePage(article) => article.image_url(),
            Self::Experience(experience) => experience.image_url(),
        }
    }

    fn image_alt(&self) -> &str {
        match self {
            Self::ArticlePage(article) => article.image_alt(),
            Self::Experience(experience) => experience.image_alt(),
        }
    }

    fn metadata(&self) -> Option<&ContentMetadata> {
        ContentVariant::metadata(self)
    }
}

impl ContentAccessors for SearchResultItem {
    fn title(&self) -> &str {
        self.content().title()
    }

    fn excerpt(&self, max_length: usize) -> String {
        self.content().excerpt(max_length)
    }

    fn image_url(&self) -> Option<&str> {
        self.content().image_url()
    }

    fn image_alt(&self) -> &str {
        self.content().image_alt()
    }

    fn metadata(&self) -> Option<&ContentMetadata> {
        self.content().metadata()
    }
}

/// Parse a CMS publication timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`, or a bare
/// `YYYY-MM-DD` (UTC midnight). Anything else yields `None`.
///
/// A naive timestamp carries no offset and is read as UTC, never as the
/// server's local time.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Pick a placeholder gradient for `title`.
///
/// Rolling 32-bit hash over UTF-16 code units (`hash * 31 + unit`, wrapping),
/// then `|hash| mod N`. Identical titles always map to the same class.
pub fn placeholder_gradient(title: &str) -> &'static str {
    let hash = title.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    let index = hash.unsigned_abs() as usize % PLACEHOLDER_GRADIENTS.len();
    PLACEHOLDER_GRADIENTS[index]
}

/// Strip markup tags and truncate to `max_length` characters.
pub fn excerpt_from_markup(markup: &str, max_length: usize) -> String {
    truncate_chars(&strip_markup(markup), max_length)
}

/// Remove every `<...>` tag, keeping the text between tags.
///
/// A `<` with no closing `>` is kept as literal text.
fn strip_markup(markup: &str) -> String {
    let mut result = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        result.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    result.push_str(rest);
    result
}

/// Truncate to `max_chars` characters, appending an ellipsis when cut.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => {
            let mut truncated = text[..end].to_owned();
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => text.to_owned(),
    }
}

fn join_url(base: &str, path: &str) -> String {
    match Url::parse(base).and_then(|parsed| parsed.join(path)) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!("{}{}", base.trim_end_matches('/'), path),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn display_name(metadata: Option<&ContentMetadata>) -> Option<&str> {
    metadata.and_then(|m| present(m.display_name.as_deref()))
}

fn image_source(image: Option<&ImageReference>) -> Option<&str> {
    let image = image?;
    image
        .url
        .as_ref()
        .and_then(|u| present(u.default.as_deref()))
        .or_else(|| image.item.as_ref().and_then(|i| present(i.url.as_deref())))
}

fn image_alt_text(image: Option<&ImageReference>) -> Option<&str> {
    let item = image?.item.as_ref()?;
    present(item.alt_text.as_deref()).or_else(|| {
        item.metadata
            .as_ref()
            .and_then(|m| present(m.display_name.as_deref()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AssetMetadata, ContentUrl, DamAsset, FullText, ReferenceUrl, RichText, SeoSettings,
    };
    use chrono::{Datelike, Timelike};

    fn metadata(display_name: Option<&str>) -> Option<ContentMetadata> {
        Some(ContentMetadata {
            display_name: display_name.map(str::to_owned),
            published: None,
            url: None,
        })
    }

    #[test]
    fn article_title_prefers_heading() {
        let article = ArticlePage {
            heading: Some("Heading".into()),
            metadata: metadata(Some("Display")),
            ..Default::default()
        };
        assert_eq!(article.title(), "Heading");
    }

    #[test]
    fn article_title_falls_back_to_display_name_then_untitled() {
        let article = ArticlePage {
            heading: Some(String::new()),
            metadata: metadata(Some("Display")),
            ..Default::default()
        };
        assert_eq!(article.title(), "Display");
        assert_eq!(ArticlePage::default().title(), UNTITLED);
    }

    #[test]
    fn experience_title_prefers_meta_title() {
        let experience = Experience {
            seo: Some(SeoSettings {
                meta_title: Some("SEO Title".into()),
                ..Default::default()
            }),
            metadata: metadata(Some("Display")),
            ..Default::default()
        };
        assert_eq!(experience.title(), "SEO Title");

        let experience = Experience {
            metadata: metadata(Some("Display")),
            ..Default::default()
        };
        assert_eq!(experience.title(), "Display");
        assert_eq!(Experience::default().title(), UNTITLED);
    }

    #[test]
    fn article_excerpt_strips_tags() {
        let article = ArticlePage {
            body: Some(RichText {
                html: Some("<p>Hello <strong>world</strong></p>".into()),
            }),
            ..Default::default()
        };
        assert_eq!(article.excerpt(DEFAULT_EXCERPT_LENGTH), "Hello world");
    }

    #[test]
    fn article_excerpt_truncates_with_ellipsis() {
        let article = ArticlePage {
            body: Some(RichText {
                html: Some(format!("<p>{}</p>", "a".repeat(250))),
            }),
            ..Default::default()
        };
        let excerpt = article.excerpt(DEFAULT_EXCERPT_LENGTH);
        assert_eq!(excerpt.chars().count(), 203);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn excerpt_at_exact_length_is_not_truncated() {
        let text = "b".repeat(10);
        assert_eq!(excerpt_from_markup(&text, 10), text);
    }

    #[test]
    fn article_without_body_has_empty_excerpt() {
        assert_eq!(ArticlePage::default().excerpt(DEFAULT_EXCERPT_LENGTH), "");
    }

    #[test]
    fn experience_excerpt_prefers_meta_description_verbatim() {
        let description = "d".repeat(300);
        let experience = Experience {
            seo: Some(SeoSettings {
                meta_description: Some(description.clone()),
                ..Default::default()
            }),
            fulltext: Some(FullText::Parts(vec![Some("ignored".into())])),
            ..Default::default()
        };
        assert_eq!(experience.excerpt(DEFAULT_EXCERPT_LENGTH), description);
    }

    #[test]
    fn experience_excerpt_joins_fulltext() {
        let experience = Experience {
            fulltext: Some(FullText::Parts(vec![
                Some("Hello".into()),
                None,
                Some("there".into()),
            ])),
            ..Default::default()
        };
        assert_eq!(experience.excerpt(DEFAULT_EXCERPT_LENGTH), "Hello there");
        assert_eq!(experience.excerpt(3), "Hel...");
        assert_eq!(Experience::default().excerpt(DEFAULT_EXCERPT_LENGTH), "");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(excerpt_from_markup(&text, 3), "ééé...");
    }

    #[test]
    fn unclosed_tag_is_kept_as_text() {
        assert_eq!(strip_markup("a < b"), "a < b");
        assert_eq!(strip_markup("<b>x</b> < y"), "x < y");
    }

    #[test]
    fn image_url_prefers_content_reference() {
        let image = ImageReference {
            url: Some(ReferenceUrl {
                default: Some("https://cms/ref.png".into()),
            }),
            item: Some(DamAsset {
                url: Some("https://dam/asset.png".into()),
                ..Default::default()
            }),
        };
        let article = ArticlePage {
            promo_image: Some(image),
            ..Default::default()
        };
        assert_eq!(article.image_url(), Some("https://cms/ref.png"));
    }

    #[test]
    fn image_url_falls_back_to_dam_asset_then_none() {
        let experience = Experience {
            seo: Some(SeoSettings {
                sharing_image: Some(ImageReference {
                    url: None,
                    item: Some(DamAsset {
                        url: Some("https://dam/share.png".into()),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(experience.image_url(), Some("https://dam/share.png"));
        assert_eq!(Experience::default().image_url(), None);
        assert_eq!(ArticlePage::default().image_url(), None);
    }

    #[test]
    fn image_alt_fallback_chain() {
        let with_alt = ArticlePage {
            heading: Some("Title".into()),
            promo_image: Some(ImageReference {
                url: None,
                item: Some(DamAsset {
                    alt_text: Some("Alt".into()),
                    metadata: Some(AssetMetadata {
                        display_name: Some("asset.png".into()),
                    }),
                    url: None,
                }),
            }),
            ..Default::default()
        };
        assert_eq!(with_alt.image_alt(), "Alt");

        let with_asset_name = ArticlePage {
            heading: Some("Title".into()),
            promo_image: Some(ImageReference {
                url: None,
                item: Some(DamAsset {
                    alt_text: None,
                    metadata: Some(AssetMetadata {
                        display_name: Some("asset.png".into()),
                    }),
                    url: None,
                }),
            }),
            ..Default::default()
        };
        assert_eq!(with_asset_name.image_alt(), "asset.png");

        let bare = ArticlePage {
            heading: Some("Title".into()),
            ..Default::default()
        };
        assert_eq!(bare.image_alt(), "Title");
    }

    #[test]
    fn placeholder_is_deterministic() {
        assert_eq!(placeholder_gradient("Pricing"), placeholder_gradient("Pricing"));
    }

    #[test]
    fn placeholder_matches_rolling_hash() {
        // "a" hashes to 97 -> index 1.
        assert_eq!(placeholder_gradient("a"), PLACEHOLDER_GRADIENTS[1]);
        // "Hello World" hashes to -862545276 -> |h| % 8 == 4.
        assert_eq!(placeholder_gradient("Hello World"), PLACEHOLDER_GRADIENTS[4]);
        // "Untitled" hashes to 77694213 -> index 5.
        assert_eq!(placeholder_gradient(UNTITLED), PLACEHOLDER_GRADIENTS[5]);
        assert_eq!(placeholder_gradient(""), PLACEHOLDER_GRADIENTS[0]);
    }

    #[test]
    fn placeholder_hashes_utf16_units() {
        // Astral characters contribute two code units.
        assert_eq!(placeholder_gradient("Café 😀"), PLACEHOLDER_GRADIENTS[6]);
    }

    #[test]
    fn item_placeholder_uses_title() {
        let item = SearchResultItem::article(ArticlePage {
            heading: Some("Pricing".into()),
            ..Default::default()
        });
        assert_eq!(item.placeholder_style(), PLACEHOLDER_GRADIENTS[6]);
    }

    #[test]
    fn canonical_url_joins_base_and_path() {
        let article = ArticlePage {
            metadata: Some(ContentMetadata {
                url: Some(ContentUrl {
                    base: Some("https://x.com".into()),
                    default: Some("/en/news/".into()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            article.canonical_url().as_deref(),
            Some("https://x.com/en/news/")
        );
        assert_eq!(ArticlePage::default().canonical_url(), None);
    }

    #[test]
    fn parse_published_accepts_common_forms() {
        let rfc = parse_published("2024-06-01T12:30:00+02:00").expect("rfc3339");
        assert_eq!(rfc.hour(), 10);
        let naive = parse_published("2024-06-01T12:30:00.250").expect("naive");
        assert_eq!(naive.minute(), 30);
        assert_eq!(naive.hour(), 12, "naive timestamps are read as UTC");
        let date = parse_published("2024-01-05").expect("date");
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 5));
        assert!(parse_published("not a date").is_none());
        assert!(parse_published("").is_none());
    }

    #[test]
    fn formatted_date_uses_long_form() {
        let article = ArticlePage {
            metadata: Some(ContentMetadata {
                published: Some("2024-01-05T08:00:00Z".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(article.formatted_date().as_deref(), Some("January 5, 2024"));
        assert_eq!(ArticlePage::default().formatted_date(), None);
    }

    #[test]
    fn variant_dispatches_on_tag() {
        let article = ContentVariant::ArticlePage(ArticlePage {
            heading: Some("A".into()),
            ..Default::default()
        });
        let experience = ContentVariant::Experience(Experience {
            metadata: metadata(Some("E")),
            ..Default::default()
        });
        assert_eq!(article.title(), "A");
        assert_eq!(experience.title(), "E");
    }
}
