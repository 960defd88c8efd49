//! Integration tests for `HttpFetcher`.
//!
//! Each test points one site's origin at a local `wiremock` server so no
//! real network traffic is made.

use std::time::{Duration, Instant};

use pricelens_core::Site;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricelens_scraper::{HttpFetcher, ScraperError};

/// 5-second timeout, descriptive UA, no retries.
fn test_fetcher(server: &MockServer, site: Site) -> HttpFetcher {
    HttpFetcher::new(5, "pricelens-test/0.1", 0, 0)
        .expect("failed to build test HttpFetcher")
        .with_origin(site, server.uri())
}

fn test_fetcher_with_retries(server: &MockServer, site: Site, max_retries: u32) -> HttpFetcher {
    HttpFetcher::new(5, "pricelens-test/0.1", max_retries, 0)
        .expect("failed to build test HttpFetcher")
        .with_origin(site, server.uri())
}

#[tokio::test]
async fn returns_page_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("keyword", "usb cable"))
        .and(query_param("sort", "rlvncy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher(&server, Site::Snapdeal)
        .fetch_page(Site::Snapdeal, "usb cable")
        .await
        .unwrap();
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(header("user-agent", "pricelens-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_fetcher(&server, Site::Amazon)
        .fetch_page(Site::Amazon, "iphone")
        .await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>second</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher_with_retries(&server, Site::Flipkart, 2)
        .fetch_page(Site::Flipkart, "earbuds")
        .await
        .unwrap();
    assert_eq!(body, "<html>second</html>");
}

#[tokio::test]
async fn not_found_maps_to_not_found_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/searchB"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_fetcher_with_retries(&server, Site::Croma, 3)
        .fetch_page(Site::Croma, "tv")
        .await;
    assert!(
        matches!(result, Err(ScraperError::NotFound { .. })),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let result = test_fetcher(&server, Site::Amazon)
        .fetch_page(Site::Amazon, "iphone")
        .await;
    match result {
        Err(ScraperError::RateLimited {
            retry_after_secs, ..
        }) => assert_eq!(retry_after_secs, Some(30)),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn too_many_requests_without_retry_after_has_no_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = test_fetcher(&server, Site::Amazon)
        .fetch_page(Site::Amazon, "iphone")
        .await;
    match result {
        Err(ScraperError::RateLimited {
            retry_after_secs, ..
        }) => assert_eq!(retry_after_secs, None),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limited_retry_waits_for_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>after wait</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let body = test_fetcher_with_retries(&server, Site::Snapdeal, 1)
        .fetch_page(Site::Snapdeal, "charger")
        .await
        .unwrap();
    assert_eq!(body, "<html>after wait</html>");
    assert!(
        started.elapsed() >= Duration::from_secs(1),
        "retry fired after {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn forbidden_maps_to_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_fetcher_with_retries(&server, Site::Flipkart, 2)
        .fetch_page(Site::Flipkart, "earbuds")
        .await;
    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 403, .. })),
        "expected UnexpectedStatus(403), got: {result:?}"
    );
}
