//! URL handling module for cv-finder
//!
//! This module provides start URL validation, origin confinement, visited-set
//! normalization, and naming of fetched resources.

mod normalize;
mod origin;

use crate::CrawlError;
use url::Url;

// Re-export main functions
pub use normalize::{document_name, normalize_url, path_extension};
pub use origin::Origin;

/// Parses and validates the URL a crawl starts from
///
/// The URL must parse, use the `http` or `https` scheme, and carry a host.
/// No network activity happens here.
///
/// # Returns
///
/// * `Ok((Url, Origin))` - The parsed start URL and the origin the crawl is confined to
/// * `Err(CrawlError::InvalidStartUrl)` - The URL is unusable as a start page
///
/// # Examples
///
/// ```
/// use cv_finder::url::parse_start_url;
///
/// assert!(parse_start_url("https://example.com/").is_ok());
/// assert!(parse_start_url("example.com").is_err());
/// assert!(parse_start_url("ftp://example.com/cv.pdf").is_err());
/// ```
pub fn parse_start_url(start_url: &str) -> Result<(Url, Origin), CrawlError> {
    let url = Url::parse(start_url.trim())
        .map_err(|e| CrawlError::InvalidStartUrl(format!("{}: {}", start_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(CrawlError::InvalidStartUrl(format!(
            "{}: unsupported scheme '{}'",
            start_url,
            url.scheme()
        )));
    }

    let origin = Origin::of(&url)
        .ok_or_else(|| CrawlError::InvalidStartUrl(format!("{}: missing host", start_url)))?;

    Ok((url, origin))
}
