//! Integration tests for the HTTP service
//!
//! Each test starts the service on an ephemeral port, plus a wiremock site
//! for crawl routes, then talks to the service over real HTTP.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cv_finder::config::Config;
use cv_finder::crawler::Crawler;
use cv_finder::output::Envelope;
use cv_finder::server::{router, ApiKeys, AppState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

/// Starts the service and returns its base URL
async fn start_service() -> String {
    let crawler = Crawler::from_config(&Config::default()).expect("Failed to build crawler");
    let state = AppState::new(crawler, ApiKeys::new([API_KEY]));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A site whose start page links to a PDF CV
async fn start_site() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            br#"<html><head><title>Jane</title></head><body><a href="/jane-cv.pdf">Download</a></body></html>"#
                .to_vec(),
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jane-cv.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.7 cv".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    mock_server
}

async fn get(url: &str, api_key: Option<&str>) -> (u16, Envelope) {
    let client = reqwest::Client::new();
    let mut request = client.get(url);
    if let Some(key) = api_key {
        request = request.header("x-api-key", key);
    }

    let response = request.send().await.expect("Request failed");
    let status = response.status().as_u16();
    let body = response.text().await.expect("Failed to read body");
    let envelope: Envelope = serde_json::from_str(&body).expect("Body is not an envelope");
    (status, envelope)
}

#[tokio::test]
async fn test_healthz() {
    let service = start_service().await;

    let response = reqwest::get(format!("{}/healthz", service))
        .await
        .expect("Request failed");
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_missing_api_key_is_rejected() {
    let service = start_service().await;
    let site = start_site().await;

    let (status, envelope) = get(
        &format!("{}/findCVOnHomepage?url={}/", service, site.uri()),
        None,
    )
    .await;

    assert_eq!(status, 401);
    assert_eq!(envelope.status_code, 401);
    assert_eq!(envelope.status_code_description, "Unauthorized");
    assert!(envelope.document_link.is_none());

    // Rejected requests never reach the site
    let requests = site.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_unknown_api_key_is_rejected() {
    let service = start_service().await;

    let (status, _) = get(
        &format!("{}/findCVOnHomepage?url=https://example.com/", service),
        Some("wrong-key"),
    )
    .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let service = start_service().await;

    let (status, envelope) = get(&format!("{}/findCVOnHomepage", service), Some(API_KEY)).await;

    assert_eq!(status, 400);
    assert_eq!(envelope.status_code_description, "Bad Request");
    assert!(envelope.message.is_some());
}

#[tokio::test]
async fn test_url_without_scheme_is_bad_request() {
    let service = start_service().await;

    let (status, envelope) = get(
        &format!("{}/findCVOnHomepage?url=example.com", service),
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, 400);
    let message = envelope.message.expect("Expected a message");
    assert!(message.contains("http or https"), "{}", message);
}

#[tokio::test]
async fn test_found_document_is_returned_base64() {
    let service = start_service().await;
    let site = start_site().await;

    let (status, envelope) = get(
        &format!("{}/findCVOnHomepage?url={}/", service, site.uri()),
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.status_code_description, "OK");
    assert_eq!(envelope.document_name.as_deref(), Some("jane-cv.pdf"));
    assert_eq!(
        envelope.document_link,
        Some(format!("{}/jane-cv.pdf", site.uri()))
    );
    assert_eq!(envelope.document_type.as_deref(), Some("application/pdf"));
    assert_eq!(envelope.decode_content(), Some(b"%PDF-1.7 cv".to_vec()));
}

#[tokio::test]
async fn test_api_key_query_parameter() {
    let service = start_service().await;
    let site = start_site().await;

    let (status, _) = get(
        &format!(
            "{}/findCVOnHomepage?url={}/&apiKey={}",
            service,
            site.uri(),
            API_KEY
        ),
        None,
    )
    .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_nothing_found_is_not_found() {
    let service = start_service().await;
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><head><title>Home</title></head><body>Hello</body></html>".to_vec(),
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    let (status, envelope) = get(
        &format!("{}/findCVOnHomepage?url={}/", service, mock_server.uri()),
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(envelope.status_code_description, "Not Found");
    assert!(envelope.document_content.is_none());
}

async fn post(url: &str, api_key: Option<&str>, body: String) -> (u16, Envelope) {
    let client = reqwest::Client::new();
    let mut request = client
        .post(url)
        .header("content-type", "application/json")
        .body(body);
    if let Some(key) = api_key {
        request = request.header("x-api-key", key);
    }

    let response = request.send().await.expect("Request failed");
    let status = response.status().as_u16();
    let body = response.text().await.expect("Failed to read body");
    let envelope: Envelope = serde_json::from_str(&body).expect("Body is not an envelope");
    (status, envelope)
}

fn encoded_docx() -> String {
    use docx_rs::{Docx, Paragraph, Run};

    let docx = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Jane Doe"))
                .style("Heading1"),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Rust engineer")));

    let mut buffer = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack docx");
    STANDARD.encode(buffer.into_inner())
}

#[tokio::test]
async fn test_word_to_markdown_with_key_in_body() {
    let service = start_service().await;

    let body = json!({"documentContent": encoded_docx(), "apiKey": API_KEY}).to_string();
    let (status, envelope) = post(&format!("{}/wordToMarkdown", service), None, body).await;

    assert_eq!(status, 200);
    assert_eq!(
        envelope.document_markdown.as_deref(),
        Some("# Jane Doe\nRust engineer")
    );
    assert!(envelope.document_text.is_none());
}

#[tokio::test]
async fn test_word_to_plain_text() {
    let service = start_service().await;

    let body = json!({"documentContent": encoded_docx()}).to_string();
    let (status, envelope) =
        post(&format!("{}/wordToPlainText", service), Some(API_KEY), body).await;

    assert_eq!(status, 200);
    assert_eq!(
        envelope.document_text.as_deref(),
        Some("Jane Doe\nRust engineer")
    );
}

#[tokio::test]
async fn test_pdf_conversion_rejects_invalid_base64() {
    let service = start_service().await;

    let body = json!({"documentContent": "not base64!"}).to_string();
    let (status, envelope) =
        post(&format!("{}/pdfToPlainText", service), Some(API_KEY), body).await;

    assert_eq!(status, 400);
    assert_eq!(
        envelope.message.as_deref(),
        Some("documentContent is not valid base64 data")
    );
}

#[tokio::test]
async fn test_pdf_conversion_rejects_unparseable_document() {
    let service = start_service().await;

    let body = json!({"documentContent": STANDARD.encode(b"plain words")}).to_string();
    let (status, envelope) =
        post(&format!("{}/pdfToMarkdown", service), Some(API_KEY), body).await;

    assert_eq!(status, 400);
    assert_eq!(envelope.message.as_deref(), Some("Unable to parse PDF document"));
}

#[tokio::test]
async fn test_conversion_requires_document_content() {
    let service = start_service().await;

    for body in [
        json!({}).to_string(),
        json!({"documentContent": ""}).to_string(),
        "not json".to_string(),
    ] {
        let (status, envelope) =
            post(&format!("{}/wordToPlainText", service), Some(API_KEY), body).await;
        assert_eq!(status, 400);
        assert_eq!(
            envelope.message.as_deref(),
            Some("documentContent must be provided")
        );
    }
}

#[tokio::test]
async fn test_conversion_requires_api_key() {
    let service = start_service().await;

    let body = json!({"documentContent": encoded_docx(), "apiKey": "wrong-key"}).to_string();
    let (status, envelope) = post(&format!("{}/wordToMarkdown", service), None, body).await;

    assert_eq!(status, 401);
    assert!(envelope.document_markdown.is_none());
}
