use crate::crawler::{CrawlOutcome, CrawlReport};

/// Prints a crawl report to stderr in a formatted manner
///
/// stdout is reserved for the JSON envelope.
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &CrawlReport) {
    eprintln!("=== Crawl Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Pages fetched: {}", report.stats.pages_fetched);
    eprintln!("  Fetch failures: {}", report.stats.fetch_failures);
    eprintln!("  Duplicates skipped: {}", report.stats.duplicates_skipped);
    eprintln!("  Documents rejected: {}", report.stats.documents_rejected);
    eprintln!("  Links queued: {}", report.stats.links_enqueued);
    eprintln!();

    eprintln!("Outcome: {}", describe_outcome(&report.outcome));
}

/// One-line description of how a crawl ended
pub fn describe_outcome(outcome: &CrawlOutcome) -> String {
    match outcome {
        CrawlOutcome::Matched(document) => format!(
            "matched document {} ({})",
            document.document_link, document.document_type
        ),
        CrawlOutcome::BestCandidate(page) => {
            format!("best HTML candidate {}", page.document_link)
        }
        CrawlOutcome::NoMatch => "nothing found".to_string(),
    }
}
