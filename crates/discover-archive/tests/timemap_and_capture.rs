use discover_archive::{fetch_capture, timemap, ArchivePool, FetchOutcome, TimemapResult};
use discover_model::{Timestamp, Year};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn timemap_parses_plaintext_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "20160101000000 ABCDEF\n20160615120000 GHIJKL\n",
        ))
        .mount(&server)
        .await;

    let pool = ArchivePool::with_bases(4, None, format!("{}/cdx", server.uri()), format!("{}/web", server.uri()));
    let result = timemap(&pool, "example.com", Year::parse("2016").unwrap(), None)
        .await
        .unwrap();

    match result {
        TimemapResult::Captures(records) => assert_eq!(records.len(), 2),
        TimemapResult::Empty => panic!("expected captures"),
    }
}

#[tokio::test]
async fn timemap_empty_body_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let pool = ArchivePool::with_bases(4, None, format!("{}/cdx", server.uri()), format!("{}/web", server.uri()));
    let result = timemap(&pool, "example.com", Year::parse("2016").unwrap(), None)
        .await
        .unwrap();
    assert!(matches!(result, TimemapResult::Empty));
}

#[tokio::test]
async fn capture_fetch_rejects_non_html_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]).insert_header("content-type", "image/png"))
        .mount(&server)
        .await;

    let pool = ArchivePool::with_bases(4, None, format!("{}/cdx", server.uri()), server.uri());
    let ts = Timestamp::parse("20160101000000").unwrap();
    let outcome = fetch_capture(&pool, &ts, "example.com", 1024).await;
    assert!(matches!(outcome, FetchOutcome::Rejected));
}

#[tokio::test]
async fn capture_fetch_caps_body_at_max_bytes() {
    let server = MockServer::start().await;
    let big_body = "x".repeat(1000);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(big_body).insert_header("content-type", "text/html"))
        .mount(&server)
        .await;

    let pool = ArchivePool::with_bases(4, None, format!("{}/cdx", server.uri()), server.uri());
    let ts = Timestamp::parse("20160101000000").unwrap();
    let outcome = fetch_capture(&pool, &ts, "example.com", 100).await;
    match outcome {
        FetchOutcome::Body(bytes) => assert_eq!(bytes.len(), 100),
        _ => panic!("expected a body"),
    }
}
