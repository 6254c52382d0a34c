use super::document::DocumentResult;

/// An HTML page considered as a stand-in for a matched document
#[derive(Debug, Clone)]
pub struct Candidate {
    pub score: u32,
    pub depth: u32,
    pub result: DocumentResult,
}

/// Keeps the best HTML candidate seen during one crawl
///
/// A new candidate replaces the current best only if it scores higher, or
/// scores the same at a shallower depth. Every other tie keeps the page that
/// was found first.
#[derive(Debug, Default)]
pub struct ResultSelector {
    best: Option<Candidate>,
}

impl ResultSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate; returns true if it became the new best
    pub fn consider(&mut self, candidate: Candidate) -> bool {
        let replace = match &self.best {
            None => true,
            Some(best) => {
                candidate.score > best.score
                    || (candidate.score == best.score && candidate.depth < best.depth)
            }
        };

        if replace {
            self.best = Some(candidate);
        }
        replace
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Returns the best page if its score is strictly above `threshold`
    pub fn best_or_none(self, threshold: u32) -> Option<DocumentResult> {
        self.best
            .filter(|candidate| candidate.score > threshold)
            .map(|candidate| candidate.result)
    }
}
