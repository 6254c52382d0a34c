//! Breadth-first traversal - the crawl state machine
//!
//! One [`Traversal`] owns the frontier, the visited set and the result
//! selector for a single crawl. Each [`Traversal::step`] pops one entry,
//! fetches it, and either ends the crawl on a document match or scores the
//! page and queues its same-origin links.

use super::classifier::{classify, document_type, ResourceKind};
use super::document::DocumentResult;
use super::fetcher::{Fetch, FetchResult, FetchedResource};
use super::frontier::{FifoFrontier, Frontier, FrontierEntry};
use super::parser::{extract_links, extract_text, extract_title};
use super::scorer::{is_document_match, score_html_candidate, DocumentSignals, PageSignals};
use super::selector::{Candidate, ResultSelector};
use crate::url::{document_name, normalize_url, parse_start_url, Origin};
use crate::CrawlError;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// MIME type reported for HTML candidates
const HTML_MIME_TYPE: &str = "text/html";

/// Candidates must score strictly above this to be returned
const MIN_CANDIDATE_SCORE: u32 = 0;

/// State of the traversal after a step
#[derive(Debug)]
pub enum CrawlState {
    /// Entries remain in the frontier
    Running,
    /// A document matched; the crawl is over
    Matched(DocumentResult),
    /// The frontier is empty
    Exhausted,
}

/// How a finished crawl ended
#[derive(Debug)]
pub enum CrawlOutcome {
    /// A document whose name, link, anchor or disposition mentions a CV
    Matched(DocumentResult),
    /// No document matched; the best HTML page scored above zero
    BestCandidate(DocumentResult),
    /// Nothing acceptable was found
    NoMatch,
}

impl CrawlOutcome {
    pub fn into_result(self) -> Option<DocumentResult> {
        match self {
            Self::Matched(result) | Self::BestCandidate(result) => Some(result),
            Self::NoMatch => None,
        }
    }
}

/// Counters collected during a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub duplicates_skipped: usize,
    pub documents_rejected: usize,
    pub links_enqueued: usize,
}

/// Final outcome plus counters
#[derive(Debug)]
pub struct CrawlReport {
    pub outcome: CrawlOutcome,
    pub stats: CrawlStats,
}

/// A single crawl in progress
pub struct Traversal<'f, F, Q = FifoFrontier> {
    fetcher: &'f F,
    origin: Origin,
    max_depth: u32,
    frontier: Q,
    visited: HashSet<Url>,
    selector: ResultSelector,
    stats: CrawlStats,
}

impl<'f, F: Fetch> Traversal<'f, F, FifoFrontier> {
    /// Creates a breadth-first traversal seeded with `start_url`
    ///
    /// Fails with [`CrawlError::InvalidStartUrl`] before any fetch when the
    /// URL is not an http(s) URL with a host.
    pub fn new(fetcher: &'f F, start_url: &str, max_depth: u32) -> Result<Self, CrawlError> {
        Self::with_frontier(fetcher, start_url, max_depth, FifoFrontier::new())
    }
}

impl<'f, F: Fetch, Q: Frontier> Traversal<'f, F, Q> {
    /// Creates a traversal that uses the given frontier discipline
    pub fn with_frontier(
        fetcher: &'f F,
        start_url: &str,
        max_depth: u32,
        mut frontier: Q,
    ) -> Result<Self, CrawlError> {
        let (url, origin) = parse_start_url(start_url)?;
        frontier.push(FrontierEntry::seed(normalize_url(&url)));

        Ok(Self {
            fetcher,
            origin,
            max_depth,
            frontier,
            visited: HashSet::new(),
            selector: ResultSelector::new(),
            stats: CrawlStats::default(),
        })
    }

    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    /// Processes one frontier entry
    pub async fn step(&mut self) -> CrawlState {
        let Some(entry) = self.frontier.pop() else {
            return CrawlState::Exhausted;
        };

        if !self.visited.insert(entry.url.clone()) {
            self.stats.duplicates_skipped += 1;
            return CrawlState::Running;
        }

        tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

        let resource = match self.fetcher.fetch(&entry.url).await {
            FetchResult::Success(resource) => resource,
            FetchResult::HttpError { status_code } => {
                tracing::debug!("Skipping {}: HTTP {}", entry.url, status_code);
                self.stats.fetch_failures += 1;
                return CrawlState::Running;
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("Skipping {}: {}", entry.url, error);
                self.stats.fetch_failures += 1;
                return CrawlState::Running;
            }
        };
        self.stats.pages_fetched += 1;

        match classify(&entry.url, resource.content_type.as_deref()) {
            ResourceKind::Document => {
                if let Some(document) = match_document(&entry, resource) {
                    tracing::info!("Matched document {}", document.document_link);
                    return CrawlState::Matched(document);
                }
                tracing::debug!("Document {} does not look like a CV", entry.url);
                self.stats.documents_rejected += 1;
            }
            ResourceKind::Html => self.visit_page(&entry, resource),
            ResourceKind::Other => {
                tracing::debug!(
                    "Ignoring {} with content type {:?}",
                    entry.url,
                    resource.content_type
                );
            }
        }

        CrawlState::Running
    }

    /// Steps until a document matches or the frontier runs dry
    pub async fn run(mut self) -> CrawlReport {
        let outcome = loop {
            match self.step().await {
                CrawlState::Running => continue,
                CrawlState::Matched(document) => break CrawlOutcome::Matched(document),
                CrawlState::Exhausted => {
                    let selector = std::mem::take(&mut self.selector);
                    break match selector.best_or_none(MIN_CANDIDATE_SCORE) {
                        Some(page) => CrawlOutcome::BestCandidate(page),
                        None => CrawlOutcome::NoMatch,
                    };
                }
            }
        };

        tracing::info!(
            "Crawl finished: {} pages fetched, {} failures, {} links queued",
            self.stats.pages_fetched,
            self.stats.fetch_failures,
            self.stats.links_enqueued
        );

        CrawlReport {
            outcome,
            stats: self.stats,
        }
    }

    /// Scores an HTML page, offers it to the selector and queues its links
    fn visit_page(&mut self, entry: &FrontierEntry, resource: FetchedResource) {
        let (title, score) = {
            let html = String::from_utf8_lossy(&resource.body);
            let document = Html::parse_document(&html);

            let title = extract_title(&document).unwrap_or_else(|| document_name(&entry.url));
            let text = extract_text(&document);
            let score = score_html_candidate(&PageSignals {
                url: Some(entry.url.as_str()),
                text: Some(&text),
                anchor_hint: entry.anchor_hint.as_deref(),
                title: Some(&title),
            });
            tracing::debug!("Scored {} at {}", entry.url, score);
            if resource.url != entry.url {
                tracing::debug!("{} redirected to {}", entry.url, resource.url);
            }

            // Links resolve against the requested URL, not the redirect target
            if entry.depth < self.max_depth {
                self.enqueue_links(entry, &document);
            }

            (title, score)
        };

        let candidate = Candidate {
            score,
            depth: entry.depth,
            result: DocumentResult {
                document_name: title,
                document_link: entry.url.to_string(),
                document_type: HTML_MIME_TYPE.to_string(),
                document_content: resource.body,
            },
        };
        if self.selector.consider(candidate) {
            tracing::debug!("New best candidate {} (score {})", entry.url, score);
        }
    }

    fn enqueue_links(&mut self, entry: &FrontierEntry, document: &Html) {
        for link in extract_links(document, &entry.url) {
            if !self.origin.contains(&link.url) {
                tracing::trace!("Skipping off-origin link {}", link.url);
                continue;
            }

            let url = normalize_url(&link.url);
            if self.visited.contains(&url) {
                continue;
            }

            tracing::trace!("Queueing {} from {}", url, entry.url);
            self.frontier.push(FrontierEntry {
                url,
                depth: entry.depth + 1,
                anchor_hint: link.anchor_text.or_else(|| entry.anchor_hint.clone()),
            });
            self.stats.links_enqueued += 1;
        }
    }
}

/// Builds the result for a document whose identifying text mentions a CV
fn match_document(entry: &FrontierEntry, resource: FetchedResource) -> Option<DocumentResult> {
    let filename = document_name(&entry.url);
    let signals = DocumentSignals {
        filename: Some(&filename),
        url: Some(entry.url.as_str()),
        anchor_hint: entry.anchor_hint.as_deref(),
        content_disposition: resource.content_disposition.as_deref(),
    };
    if !is_document_match(&signals) {
        return None;
    }

    Some(DocumentResult {
        document_type: document_type(&entry.url, resource.content_type.as_deref()),
        document_name: filename,
        document_link: entry.url.to_string(),
        document_content: resource.body,
    })
}
