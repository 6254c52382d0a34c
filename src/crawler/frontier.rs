//! Frontier of URLs waiting to be fetched
//!
//! The traversal is written against the [`Frontier`] trait; the default
//! [`FifoFrontier`] gives breadth-first order, which the shallower-wins
//! tie-break relies on.

use std::collections::VecDeque;
use url::Url;

/// A URL queued for fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch, already normalized
    pub url: Url,

    /// Link distance from the start page
    pub depth: u32,

    /// Anchor text of the link that led here, inherited when a link has none
    pub anchor_hint: Option<String>,
}

impl FrontierEntry {
    /// The entry a crawl is seeded with
    pub fn seed(url: Url) -> Self {
        Self {
            url,
            depth: 0,
            anchor_hint: None,
        }
    }
}

/// Queue discipline for pending fetches
pub trait Frontier {
    fn push(&mut self, entry: FrontierEntry);

    fn pop(&mut self) -> Option<FrontierEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out frontier (breadth-first traversal)
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<FrontierEntry>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
