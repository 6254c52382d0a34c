//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests returning the raw body and the headers the crawl needs
//! - Error classification into skip-worthy outcomes
//!
//! A failed fetch is never retried. The traversal treats every non-success
//! variant of [`FetchResult`] the same way: the page is skipped.

use crate::config::Config;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// A resource retrieved with a 2xx status
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// Final URL after redirects
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value, if present
    pub content_type: Option<String>,

    /// Content-Disposition header value, if present
    pub content_disposition: Option<String>,

    /// Raw body bytes
    pub body: Vec<u8>,
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the resource
    Success(FetchedResource),

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Fetch-by-URL primitive the traversal is driven by
pub trait Fetch {
    /// Fetches a single URL
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchResult> + Send;
}

/// [`Fetch`] implementation backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler and user agent configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent.header_value(),
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        Ok(Self { client })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The `User-Agent` header value, e.g. `CVFinderBot/1.0`
/// * `timeout` - Timeout applied to each request as a whole
///
/// # Example
///
/// ```no_run
/// use cv_finder::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("CVFinderBot/1.0", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Success` with body and headers |
/// | Any other status | `HttpError` |
/// | Timeout, connect failure, body read failure | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    let content_type = header_value(&response, CONTENT_TYPE);
    let content_disposition = header_value(&response, CONTENT_DISPOSITION);

    match response.bytes().await {
        Ok(body) => FetchResult::Success(FetchedResource {
            url: final_url,
            status_code: status.as_u16(),
            content_type,
            content_disposition,
            body: body.to_vec(),
        }),
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

fn header_value(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
