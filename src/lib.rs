//! cv-finder: locates a résumé/CV on a website
//!
//! This crate crawls outward from a start page, breadth first and bounded by
//! depth and host, and returns either the first document whose name or link
//! mentions a CV, or the most CV-like HTML page it saw along the way. The
//! [`convert`] module turns a Word or PDF CV into plain text or markdown.

pub mod config;
pub mod convert;
pub mod crawler;
pub mod output;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for cv-finder operations
#[derive(Debug, Error)]
pub enum CvFinderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors visible from a single crawl
///
/// Per-page failures never surface here; they are skipped inside the
/// traversal. Finding nothing is `Ok(None)`, not an error.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("URL must include http or https scheme: {0}")]
    InvalidStartUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from converting a submitted document
///
/// All of these are the caller's fault and map to 400.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("documentContent is not valid base64 data")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unable to parse Word document")]
    UnreadableWord(String),

    #[error("Unable to parse PDF document")]
    UnreadablePdf(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{discover_document, DocumentResult};
pub use output::Envelope;
