//! End-to-end runs against the mock servers

use crate::support::{create_test_config, hit, search_body};
use hn_scout::output::{JsonFileSink, MarkdownSink, MultiSink};
use hn_scout::source::render_thread;
use hn_scout::{execute, ScoutError, StopReason};
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page: u64, nb_pages: u64, hits: Vec<Value>, times: u64) {
    Mock::given(method("GET"))
        .and(path("/search_by_date"))
        .and(query_param("page", page.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(hits, page, nb_pages)))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_with_comments() {
    let mock_server = MockServer::start().await;
    let mut config = create_test_config(&mock_server, "robots", "robot");
    config.search.check_comments = true;

    mount_page(
        &mock_server,
        0,
        2,
        vec![
            hit("1", "Robots are coming", 2),
            hit("2", "Gardening tips", 5),
            hit("3", "ROBOT arms, cheap", 0),
        ],
        1,
    )
    .await;
    mount_page(
        &mock_server,
        1,
        2,
        vec![hit("4", "A robot wrote this", 1)],
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/item"))
        .and(query_param("id", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(render_thread(&[
                    ("alice", "My robot vacuum agrees"),
                    ("bob", "nothing relevant"),
                ]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Entries without replies are never fetched
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(query_param("id", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    // A failing thread does not stop the run
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(query_param("id", "4"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    let md_path = dir.path().join("report.md");
    let sink = MultiSink::new()
        .with(JsonFileSink::new(&json_path))
        .with(MarkdownSink::new(&md_path));

    let report = execute(&config, &sink, std::future::pending())
        .await
        .unwrap();

    let titles: Vec<&str> = report
        .entry_matches()
        .iter()
        .map(|m| m.entry.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Robots are coming", "ROBOT arms, cheap", "A robot wrote this"]
    );
    assert_eq!(report.comment_matches().len(), 1);
    assert_eq!(report.comment_matches()[0].author, "alice");
    assert_eq!(report.total_match_count(), 4);
    assert_eq!(report.stop_reason(), Some(StopReason::SourceExhausted));
    assert_eq!(report.stats().pages_fetched, 2);
    assert_eq!(report.stats().threads_failed, 1);

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(written["message"], "HN scraping complete");
    assert_eq!(written["report"]["total_match_count"], 4);
    assert_eq!(
        written["report"]["comment_matches"][0]["thread_url"],
        format!("{}/item?id=1", mock_server.uri())
    );

    let summary = std::fs::read_to_string(&md_path).unwrap();
    assert!(summary.contains("Robots are coming"));
}

#[tokio::test]
async fn test_budget_stops_pagination() {
    let mock_server = MockServer::start().await;
    let mut config = create_test_config(&mock_server, "robots", "robot");
    config.search.max_results = 2;

    mount_page(
        &mock_server,
        0,
        5,
        vec![
            hit("1", "robot one", 0),
            hit("2", "robot two", 0),
            hit("3", "robot three", 0),
            hit("4", "robot four", 0),
        ],
        1,
    )
    .await;
    mount_page(&mock_server, 1, 5, vec![hit("5", "robot five", 0)], 0).await;

    let dir = tempfile::tempdir().unwrap();
    let sink = JsonFileSink::new(dir.path().join("report.json"));

    let report = execute(&config, &sink, std::future::pending())
        .await
        .unwrap();

    let titles: Vec<&str> = report
        .entry_matches()
        .iter()
        .map(|m| m.entry.title.as_str())
        .collect();
    assert_eq!(titles, vec!["robot one", "robot two"]);
    assert_eq!(report.stop_reason(), Some(StopReason::BudgetMet));
}

#[tokio::test]
async fn test_server_error_keeps_earlier_matches() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "robots", "robot");

    mount_page(&mock_server, 0, 3, vec![hit("1", "robot one", 0)], 1).await;
    Mock::given(method("GET"))
        .and(path("/search_by_date"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 2, 3, vec![hit("3", "robot three", 0)], 0).await;

    let dir = tempfile::tempdir().unwrap();
    let sink = JsonFileSink::new(dir.path().join("report.json"));

    let report = execute(&config, &sink, std::future::pending())
        .await
        .unwrap();

    assert_eq!(report.entry_matches().len(), 1);
    assert_eq!(report.stop_reason(), Some(StopReason::FetchFailed));
}

#[tokio::test]
async fn test_page_ceiling_limits_requests() {
    let mock_server = MockServer::start().await;
    let mut config = create_test_config(&mock_server, "robots", "robot");
    config.limits.page_ceiling = 2;

    Mock::given(method("GET"))
        .and(path("/search_by_date"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body(vec![hit("9", "nothing here", 0)], 0, 50)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sink = JsonFileSink::new(dir.path().join("report.json"));

    let report = execute(&config, &sink, std::future::pending())
        .await
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.stop_reason(), Some(StopReason::PageCeiling));
}

#[tokio::test]
async fn test_invalid_pattern_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server, "robots", "robot[");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    let sink = JsonFileSink::new(&json_path);

    let result = execute(&config, &sink, std::future::pending()).await;

    assert!(matches!(result, Err(ScoutError::Config(_))));
    assert!(!json_path.exists());
}
