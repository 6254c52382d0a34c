//! Output module for crawl results
//!
//! This module handles:
//! - The JSON response envelope returned by the CLI and the HTTP service
//! - Human-readable crawl reports

mod envelope;
mod summary;

pub use envelope::Envelope;
pub use summary::{describe_outcome, print_report};
