use url::Url;

/// Normalizes a URL for the visited set
///
/// Two links that differ only in their fragment address the same resource,
/// so the fragment is dropped. Everything else is kept as the `url` crate
/// serializes it (lowercase host, default port elided, dot segments resolved).
///
/// # Examples
///
/// ```
/// use cv_finder::url::normalize_url;
/// use url::Url;
///
/// let url = Url::parse("https://Example.com:443/a/../cv.html#top").unwrap();
/// assert_eq!(normalize_url(&url).as_str(), "https://example.com/cv.html");
/// ```
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

/// Derives a document name from the final segment of the URL path
///
/// Trailing slashes are ignored; an empty path yields `"index"`.
///
/// # Examples
///
/// ```
/// use cv_finder::url::document_name;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/files/resume.pdf").unwrap();
/// assert_eq!(document_name(&url), "resume.pdf");
///
/// let url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(document_name(&url), "index");
/// ```
pub fn document_name(url: &Url) -> String {
    url.path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("index")
        .to_string()
}

/// Returns the lowercased extension of the URL path's final segment
pub fn path_extension(url: &Url) -> Option<String> {
    let path = url.path();
    let last_segment = path.rsplit('/').next()?;
    let (_, extension) = last_segment.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}
