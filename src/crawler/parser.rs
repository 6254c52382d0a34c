//! HTML parser for extracting links and page signals
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow, paired with their anchor text
//! - Page title
//! - Visible page text used for relevance scoring

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A link found in an anchor element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Absolute URL the anchor points to
    pub url: Url,

    /// Trimmed visible anchor text; `None` when the anchor has no text
    pub anchor_text: Option<String>,
}

/// Extracts the page title from the HTML document
pub fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

/// Collects the visible text of the document body
///
/// Text inside `script`, `style`, `noscript` and `template` elements is
/// skipped; every other text node is trimmed and joined with single spaces.
pub fn extract_text(document: &Html) -> String {
    let body_selector = Selector::parse("body").ok();
    let root = body_selector
        .as_ref()
        .and_then(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();

    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|element| matches!(element.name(), "script" | "style" | "noscript" | "template"))
            .unwrap_or(false);
        if hidden {
            continue;
        }

        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(fragment);
    }

    text
}

/// Lazily yields the navigable links of a document in document order
///
/// # Link Extraction Rules
///
/// **Skip:**
/// - `<a>` elements without an `href`
/// - `javascript:`, `mailto:`, `tel:` and `data:` targets
/// - Fragment-only hrefs (`#section`)
/// - hrefs that do not resolve against `base_url`
///
/// Relative hrefs are resolved against `base_url`. The anchor text is the
/// element's visible text with whitespace collapsed, or `None` if empty.
///
/// # Example
///
/// ```
/// use cv_finder::crawler::extract_links;
/// use scraper::Html;
/// use url::Url;
///
/// let html = Html::parse_document(r#"<a href="/cv.pdf"> My CV </a><a href="mailto:me@example.com">Mail</a>"#);
/// let base_url = Url::parse("https://example.com/about").unwrap();
/// let links: Vec<_> = extract_links(&html, &base_url).collect();
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].url.as_str(), "https://example.com/cv.pdf");
/// assert_eq!(links[0].anchor_text.as_deref(), Some("My CV"));
/// ```
pub fn extract_links<'a>(
    document: &'a Html,
    base_url: &'a Url,
) -> impl Iterator<Item = ExtractedLink> + 'a {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .filter_map(move |anchor| {
            let href = anchor.value().attr("href")?;
            let url = resolve_link(href, base_url)?;
            let anchor_text = Some(collapse_whitespace(&anchor.text().collect::<String>()))
                .filter(|text| !text.is_empty());
            Some(ExtractedLink { url, anchor_text })
        })
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - empty hrefs
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - hrefs that fail to resolve
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    base_url.join(href).ok()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
