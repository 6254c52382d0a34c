//! HTTP service wrapping the crawler
//!
//! Routes:
//! - `GET /healthz` - liveness probe
//! - `GET /findCVOnHomepage?url=...` - crawl `url` and return the envelope
//! - `POST /wordToPlainText`, `/wordToMarkdown`, `/pdfToPlainText`,
//!   `/pdfToMarkdown` - convert the base64 `documentContent` of a JSON body
//!
//! Every call except `/healthz` must carry an API key. It is looked up in the
//! `x-api-key` header, then the `apiKey` query parameter, then (for POST)
//! the `apiKey` field of the JSON body.

mod auth;

pub use auth::{ApiKeys, API_KEYS_ENV};

use crate::config::Config;
use crate::convert::Conversion;
use crate::crawler::Crawler;
use crate::output::Envelope;
use crate::{ConfigError, CvFinderError};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-api-key";

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    crawler: Arc<Crawler>,
    api_keys: Arc<ApiKeys>,
}

impl AppState {
    pub fn new(crawler: Crawler, api_keys: ApiKeys) -> Self {
        Self {
            crawler: Arc::new(crawler),
            api_keys: Arc::new(api_keys),
        }
    }

    /// Builds the crawler and key set from configuration and the environment
    pub fn from_config(config: &Config) -> Result<Self, CvFinderError> {
        let crawler = Crawler::from_config(config)?;
        let api_keys = ApiKeys::from_config_and_env(&config.auth);
        if api_keys.is_empty() {
            tracing::warn!(
                "No API keys configured; set [auth] api-keys or {} to accept requests",
                API_KEYS_ENV
            );
        }
        Ok(Self::new(crawler, api_keys))
    }
}

/// Query parameters of `/findCVOnHomepage`
#[derive(Debug, Default, Deserialize)]
pub struct FindQuery {
    pub url: Option<String>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

/// Query parameters of the conversion routes
#[derive(Debug, Default, Deserialize)]
pub struct KeyQuery {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

/// JSON body of the conversion routes
///
/// A body that is not a JSON object is treated as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default)]
    pub document_content: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Builds the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/findCVOnHomepage", get(find_cv_on_homepage))
        .route("/wordToPlainText", post(word_to_plain_text))
        .route("/wordToMarkdown", post(word_to_markdown))
        .route("/pdfToPlainText", post(pdf_to_plain_text))
        .route("/pdfToMarkdown", post(pdf_to_markdown))
        .with_state(state)
}

/// Binds to the configured address and serves until shutdown
pub async fn serve(config: &Config) -> Result<(), CvFinderError> {
    let addr: SocketAddr = config.server.bind.parse().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.server.bind, e))
    })?;
    let state = AppState::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("cv-finder listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn find_cv_on_homepage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FindQuery>,
) -> (StatusCode, Json<Envelope>) {
    let api_key = request_api_key(&headers, query.api_key.as_deref(), None);
    if !state.api_keys.is_valid(api_key) {
        return respond(Envelope::unauthorized());
    }

    let Some(url) = query.url.as_deref().filter(|url| !url.trim().is_empty()) else {
        return respond(Envelope::bad_request("url parameter is required"));
    };

    let result = state.crawler.discover(url).await;
    match &result {
        Ok(Some(document)) => tracing::info!("Found {} for {}", document.document_link, url),
        Ok(None) => tracing::info!("No CV found for {}", url),
        Err(e) => tracing::warn!("Rejected crawl for {}: {}", url, e),
    }
    respond(Envelope::from_crawl(&result))
}

async fn word_to_plain_text(
    state: State<AppState>,
    headers: HeaderMap,
    query: Query<KeyQuery>,
    body: Bytes,
) -> (StatusCode, Json<Envelope>) {
    convert_document(Conversion::WordToPlainText, state, headers, query, body).await
}

async fn word_to_markdown(
    state: State<AppState>,
    headers: HeaderMap,
    query: Query<KeyQuery>,
    body: Bytes,
) -> (StatusCode, Json<Envelope>) {
    convert_document(Conversion::WordToMarkdown, state, headers, query, body).await
}

async fn pdf_to_plain_text(
    state: State<AppState>,
    headers: HeaderMap,
    query: Query<KeyQuery>,
    body: Bytes,
) -> (StatusCode, Json<Envelope>) {
    convert_document(Conversion::PdfToPlainText, state, headers, query, body).await
}

async fn pdf_to_markdown(
    state: State<AppState>,
    headers: HeaderMap,
    query: Query<KeyQuery>,
    body: Bytes,
) -> (StatusCode, Json<Envelope>) {
    convert_document(Conversion::PdfToMarkdown, state, headers, query, body).await
}

async fn convert_document(
    conversion: Conversion,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<KeyQuery>,
    body: Bytes,
) -> (StatusCode, Json<Envelope>) {
    let request: ConvertRequest = serde_json::from_slice(&body).unwrap_or_default();

    let api_key = request_api_key(
        &headers,
        query.api_key.as_deref(),
        request.api_key.as_deref(),
    );
    if !state.api_keys.is_valid(api_key) {
        return respond(Envelope::unauthorized());
    }

    let Some(content) = request.document_content.filter(|content| !content.is_empty()) else {
        return respond(Envelope::bad_request("documentContent must be provided"));
    };

    let result = match tokio::task::spawn_blocking(move || conversion.apply(&content)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("{:?} task failed: {}", conversion, e);
            return respond(Envelope::internal_error("conversion failed"));
        }
    };
    if let Err(e) = &result {
        tracing::info!("Rejected {:?} request: {}", conversion, e);
    }
    respond(Envelope::from_conversion(conversion, result))
}

/// First non-empty key from the header, the query string, then the body
fn request_api_key<'a>(
    headers: &'a HeaderMap,
    query_key: Option<&'a str>,
    body_key: Option<&'a str>,
) -> Option<&'a str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .into_iter()
        .chain(query_key)
        .chain(body_key)
        .find(|key| !key.is_empty())
}

fn respond(envelope: Envelope) -> (StatusCode, Json<Envelope>) {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope))
}
