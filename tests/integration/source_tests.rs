//! HTTP adapter tests against a mock search API and mock discussion pages

use crate::support::{create_test_config, hit, search_body};
use hn_scout::source::{render_thread, HttpSource, SortOrder, SourceAdapter};
use hn_scout::{ExtractionError, FetchError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_page_sends_search_parameters() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "rust async", "rust");

    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.user_agent.crawler_name,
        config.user_agent.crawler_version,
        config.user_agent.contact_url,
        config.user_agent.contact_email
    );

    Mock::given(method("GET"))
        .and(path("/search_by_date"))
        .and(query_param("query", "rust async"))
        .and(query_param("tags", "story"))
        .and(query_param("page", "1"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(
            vec![hit("101", "Rust async in depth", 12)],
            1,
            3,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = HttpSource::new(&config).unwrap();
    let page = source
        .fetch_page("rust async", SortOrder::ByDate, 1)
        .await
        .unwrap();

    assert!(page.has_more());
    let entries = page.find_entries();
    assert_eq!(entries.len(), 1);

    let entry = entries[0].as_ref().unwrap();
    assert_eq!(entry.title.as_deref(), Some("Rust async in depth"));
    assert_eq!(entry.replies.as_deref(), Some("12"));
    assert_eq!(
        entry.thread_link,
        Some(format!("{}/item?id=101", mock_server.uri()))
    );
}

#[tokio::test]
async fn test_last_page_reports_no_more() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "rust", "rust");

    Mock::given(method("GET"))
        .and(path("/search_by_date"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_body(vec![hit("1", "Rust", 0)], 2, 3)),
        )
        .mount(&mock_server)
        .await;

    let source = HttpSource::new(&config).unwrap();
    let page = source.fetch_page("rust", SortOrder::ByDate, 2).await.unwrap();
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_fetch_page_error_status() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "rust", "rust");

    Mock::given(method("GET"))
        .and(path("/search_by_date"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = HttpSource::new(&config).unwrap();
    let result = source.fetch_page("rust", SortOrder::ByDate, 0).await;

    assert!(matches!(
        result,
        Err(FetchError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_fetch_page_malformed_body() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "rust", "rust");

    Mock::given(method("GET"))
        .and(path("/search_by_date"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Rate limited</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let source = HttpSource::new(&config).unwrap();
    let result = source.fetch_page("rust", SortOrder::ByDate, 0).await;

    assert!(matches!(result, Err(FetchError::Malformed { .. })));
}

#[tokio::test]
async fn test_fetch_thread_parses_comments() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "rust", "rust");

    Mock::given(method("GET"))
        .and(path("/item"))
        .and(query_param("id", "42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(render_thread(&[
                    ("alice", "Rust  is\n fun"),
                    ("", "anonymous & brief"),
                    ("bob", ""),
                ]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = HttpSource::new(&config).unwrap();
    let thread_url = format!("{}/item?id=42", mock_server.uri());
    let thread = source.fetch_thread(&thread_url).await.unwrap();

    assert_eq!(thread.url(), thread_url);

    let comments = thread.find_comments();
    assert_eq!(comments.len(), 3);

    let first = comments[0].as_ref().unwrap();
    assert_eq!(first.author.as_deref(), Some("alice"));
    assert_eq!(first.text, "Rust is fun");

    let second = comments[1].as_ref().unwrap();
    assert_eq!(second.author, None);
    assert_eq!(second.text, "anonymous & brief");

    assert_eq!(comments[2], Err(ExtractionError::MissingText));
}

#[tokio::test]
async fn test_fetch_thread_not_found() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "rust", "rust");

    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let source = HttpSource::new(&config).unwrap();
    let result = source
        .fetch_thread(&format!("{}/item?id=7", mock_server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(FetchError::Status { status: 404, .. })
    ));
}
