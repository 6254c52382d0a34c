//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run full crawls
//! through the real `reqwest` fetcher.

use cv_finder::config::Config;
use cv_finder::crawler::{CrawlOutcome, Crawler};
use cv_finder::CrawlError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

fn page(title: &str, body: &str) -> ResponseTemplate {
    html(&format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    ))
}

fn crawler() -> Crawler {
    Crawler::from_config(&Config::default()).expect("Failed to build crawler")
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pdf_match_ends_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        page(
            "Jane Doe",
            r#"<a href="/files/resume.pdf">My Résumé</a> <a href="/blog">Blog</a>"#,
        ),
    )
    .await;

    mount(
        &mock_server,
        "/files/resume.pdf",
        ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4 jane".to_vec(), "application/pdf"),
    )
    .await;

    // The crawl must stop before the blog is fetched
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(page("Blog", ""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = crawler()
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    let CrawlOutcome::Matched(result) = report.outcome else {
        panic!("Expected a matched document, got {:?}", report.outcome);
    };
    assert_eq!(result.document_link, format!("{}/files/resume.pdf", base_url));
    assert_eq!(result.document_name, "resume.pdf");
    assert_eq!(result.document_type, "application/pdf");
    assert_eq!(result.document_content, b"%PDF-1.4 jane");
}

#[tokio::test]
async fn test_html_fallback_when_no_document_matches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        page(
            "Home",
            r#"<a href="/about">About</a> <a href="/papers/thesis.pdf">Thesis</a>"#,
        ),
    )
    .await;
    mount(
        &mock_server,
        "/about",
        page("About me", r#"<p>My curriculum vitae is below.</p><a href="/vita">more</a>"#),
    )
    .await;
    mount(
        &mock_server,
        "/papers/thesis.pdf",
        ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"),
    )
    .await;
    mount(&mock_server, "/vita", page("Jane Doe - Vita", "<p>Education</p>")).await;

    let result = crawler()
        .discover(&format!("{}/", base_url))
        .await
        .expect("Crawl failed")
        .expect("Expected an HTML candidate");

    // /vita scores url 3 + title 3; /about scores text 2 only
    assert_eq!(result.document_link, format!("{}/vita", base_url));
    assert_eq!(result.document_name, "Jane Doe - Vita");
    assert_eq!(result.document_type, "text/html");
}

#[tokio::test]
async fn test_no_keywords_returns_none() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        page("Home", r#"<a href="/one">One</a><a href="/two">Two</a>"#),
    )
    .await;
    mount(&mock_server, "/one", page("One", r#"<a href="/two">Two</a>"#)).await;
    mount(&mock_server, "/two", page("Two", r#"<a href="/">Home</a>"#)).await;

    let result = crawler()
        .discover(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_each_page_fetched_once_on_cycles() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for (route, body) in [
        ("/", r#"<a href="/a">A</a>"#),
        ("/a", r#"<a href="/b">B</a><a href="/">Home</a>"#),
        ("/b", r#"<a href="/a">A</a><a href="/a#top">A again</a>"#),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(page("Page", body))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    crawler()
        .discover(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");
}

#[tokio::test]
async fn test_other_origins_are_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        page(
            "Home",
            &format!(r#"<a href="{}/cv.pdf">Download</a>"#, other_server.uri()),
        ),
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"),
        )
        .expect(0)
        .mount(&other_server)
        .await;

    let result = crawler()
        .discover(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_failed_pages_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        page(
            "Home",
            r#"<a href="/gone">Gone</a><a href="/broken">Broken</a><a href="/cv">Mine</a>"#,
        ),
    )
    .await;
    mount(&mock_server, "/gone", ResponseTemplate::new(404)).await;
    mount(&mock_server, "/broken", ResponseTemplate::new(500)).await;
    mount(&mock_server, "/cv", page("Jane", "")).await;

    let report = crawler()
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.stats.fetch_failures, 2);
    let result = report.outcome.into_result().expect("Expected a candidate");
    assert_eq!(result.document_link, format!("{}/cv", base_url));
}

#[tokio::test]
async fn test_slow_pages_time_out_and_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(
        &mock_server,
        "/",
        page("Home", r#"<a href="/slow-cv">Slow</a><a href="/resume">Fast</a>"#),
    )
    .await;
    mount(
        &mock_server,
        "/slow-cv",
        page("Curriculum Vitae", "resume").set_delay(Duration::from_secs(5)),
    )
    .await;
    mount(&mock_server, "/resume", page("Jane", "")).await;

    let mut config = Config::default();
    config.crawler.request_timeout_secs = 1;
    let crawler = Crawler::from_config(&config).expect("Failed to build crawler");

    let report = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.stats.fetch_failures, 1);
    let result = report.outcome.into_result().expect("Expected a candidate");
    assert_eq!(result.document_link, format!("{}/resume", base_url));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "CVFinderBot/1.0"))
        .respond_with(page("CV", ""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = crawler()
        .discover(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");
    assert!(result.is_some());
}

#[tokio::test]
async fn test_content_disposition_identifies_document() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(&mock_server, "/", page("Home", r#"<a href="/download/17">Get it</a>"#)).await;
    mount(
        &mock_server,
        "/download/17",
        ResponseTemplate::new(200)
            .set_body_raw(b"{\\rtf1}".to_vec(), "application/rtf")
            .insert_header("content-disposition", "attachment; filename=\"Jane-Resume.rtf\""),
    )
    .await;

    let result = crawler()
        .discover(&format!("{}/", base_url))
        .await
        .expect("Crawl failed")
        .expect("Expected a document");

    assert_eq!(result.document_name, "17");
    assert_eq!(result.document_type, "application/rtf");
}

#[tokio::test]
async fn test_invalid_start_url_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let host = mock_server.uri().trim_start_matches("http://").to_string();

    let result = crawler().discover(&host).await;
    assert!(matches!(result, Err(CrawlError::InvalidStartUrl(_))));

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_discover_document_entry_point() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount(&mock_server, "/", page("Home", r#"<a href="/cv.docx">Download</a>"#)).await;
    mount(
        &mock_server,
        "/cv.docx",
        ResponseTemplate::new(200).set_body_raw(
            b"PK\x03\x04".to_vec(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
    )
    .await;

    let result = cv_finder::discover_document(&format!("{}/", base_url))
        .await
        .expect("Crawl failed")
        .expect("Expected a document");
    assert_eq!(result.document_name, "cv.docx");
}

#[tokio::test]
async fn test_start_page_redirected_to_host_alias() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    mount(
        &mock_server,
        "/",
        ResponseTemplate::new(301)
            .insert_header("location", format!("http://127.0.0.1:{}/home", port).as_str()),
    )
    .await;
    mount(
        &mock_server,
        "/home",
        page("Home", r#"<a href="files/cv.pdf">Download</a>"#),
    )
    .await;
    mount(
        &mock_server,
        "/files/cv.pdf",
        ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
    )
    .await;

    let report = crawler()
        .crawl(&format!("http://localhost:{}/", port))
        .await
        .expect("Crawl failed");

    let CrawlOutcome::Matched(result) = report.outcome else {
        panic!("Expected a matched document, got {:?}", report.outcome);
    };
    assert_eq!(
        result.document_link,
        format!("http://localhost:{}/files/cv.pdf", port)
    );
    assert_eq!(result.document_name, "cv.pdf");
}
