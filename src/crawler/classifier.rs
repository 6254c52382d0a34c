//! Content classification for fetched resources
//!
//! Decides whether a resource is a downloadable document, an HTML page to
//! score and expand, or a dead end.

use crate::url::path_extension;
use url::Url;

/// MIME types treated as downloadable documents
const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/rtf",
];

/// Path extensions treated as downloadable documents, with their MIME types
const DOCUMENT_EXTENSIONS: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("rtf", "application/rtf"),
];

/// Fallback type for documents with neither a content type nor a known extension
const OCTET_STREAM: &str = "application/octet-stream";

/// What the crawl does with a fetched resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// PDF, Word or RTF - checked for a match, never expanded
    Document,
    /// HTML page - scored as a candidate and expanded
    Html,
    /// Anything else - dead end
    Other,
}

/// Classifies a resource from its URL and declared content type
///
/// The document check runs first: a `.pdf` path served as `text/html` is
/// still a document.
///
/// # Examples
///
/// ```
/// use cv_finder::crawler::{classify, ResourceKind};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(classify(&url, Some("text/html; charset=utf-8")), ResourceKind::Html);
/// assert_eq!(classify(&url, Some("application/pdf")), ResourceKind::Document);
/// assert_eq!(classify(&url, Some("image/png")), ResourceKind::Other);
///
/// let url = Url::parse("https://example.com/CV.DOCX").unwrap();
/// assert_eq!(classify(&url, None), ResourceKind::Document);
/// ```
pub fn classify(url: &Url, content_type: Option<&str>) -> ResourceKind {
    let mime = content_type.map(primary_mime_type).unwrap_or_default();

    if DOCUMENT_MIME_TYPES.contains(&mime.as_str()) || document_extension_type(url).is_some() {
        return ResourceKind::Document;
    }

    if mime.starts_with("text/html") {
        return ResourceKind::Html;
    }

    ResourceKind::Other
}

/// Returns the primary token of a content type, lowercased and without parameters
///
/// `"Application/PDF; name=cv.pdf"` becomes `"application/pdf"`.
pub fn primary_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Chooses the MIME type reported for a matched document
///
/// Prefers the declared content type, then the type implied by the path
/// extension, then `application/octet-stream`.
pub fn document_type(url: &Url, content_type: Option<&str>) -> String {
    content_type
        .map(primary_mime_type)
        .filter(|mime| !mime.is_empty())
        .or_else(|| document_extension_type(url).map(str::to_string))
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

fn document_extension_type(url: &Url) -> Option<&'static str> {
    let extension = path_extension(url)?;
    DOCUMENT_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}
