//! Crawler module for locating a CV on a website
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetch`] trait
//! - HTML parsing and link extraction
//! - Content classification and keyword scoring
//! - The breadth-first traversal and best-candidate selection

mod classifier;
mod document;
mod fetcher;
mod frontier;
mod parser;
mod scorer;
mod selector;
mod traversal;

pub use classifier::{classify, document_type, primary_mime_type, ResourceKind};
pub use document::DocumentResult;
pub use fetcher::{build_http_client, fetch_url, Fetch, FetchResult, FetchedResource, HttpFetcher};
pub use frontier::{FifoFrontier, Frontier, FrontierEntry};
pub use parser::{extract_links, extract_text, extract_title, ExtractedLink};
pub use scorer::{
    has_cv_keyword, is_document_match, score_html_candidate, DocumentSignals, PageSignals,
    MAX_SCORE,
};
pub use selector::{Candidate, ResultSelector};
pub use traversal::{CrawlOutcome, CrawlReport, CrawlState, CrawlStats, Traversal};

use crate::config::Config;
use crate::url::parse_start_url;
use crate::CrawlError;

/// Runs crawls with a shared fetcher and depth limit
///
/// Each call to [`Crawler::crawl`] is independent: it owns its own frontier,
/// visited set and selector, so one crawler can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Crawler<F = HttpFetcher> {
    fetcher: F,
    max_depth: u32,
}

impl Crawler<HttpFetcher> {
    /// Builds a crawler backed by a `reqwest` client
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(fetcher, config.crawler.max_depth))
    }
}

impl<F: Fetch + Sync> Crawler<F> {
    pub fn new(fetcher: F, max_depth: u32) -> Self {
        Self { fetcher, max_depth }
    }

    /// Crawls from `start_url` and reports how the crawl ended
    pub async fn crawl(&self, start_url: &str) -> Result<CrawlReport, CrawlError> {
        let traversal = Traversal::new(&self.fetcher, start_url, self.max_depth)?;
        tracing::info!("Starting crawl from {}", start_url);
        Ok(traversal.run().await)
    }

    /// Crawls from `start_url` and returns the selected document, if any
    pub async fn discover(&self, start_url: &str) -> Result<Option<DocumentResult>, CrawlError> {
        Ok(self.crawl(start_url).await?.outcome.into_result())
    }
}

/// Finds the CV reachable from `start_url` using the default configuration
///
/// # Returns
///
/// * `Ok(Some(DocumentResult))` - A matched document or the best HTML page
/// * `Ok(None)` - Nothing on the site looked like a CV
/// * `Err(CrawlError::InvalidStartUrl)` - `start_url` is not an http(s) URL
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), cv_finder::CrawlError> {
/// if let Some(cv) = cv_finder::discover_document("https://example.com/").await? {
///     println!("{} ({})", cv.document_link, cv.document_type);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn discover_document(start_url: &str) -> Result<Option<DocumentResult>, CrawlError> {
    parse_start_url(start_url)?;
    Crawler::from_config(&Config::default())?
        .discover(start_url)
        .await
}
