//! Shared fixtures for the integration tests

use hn_scout::config::Config;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Creates a test configuration pointed at the mock server
pub fn create_test_config(server: &MockServer, term: &str, pattern: &str) -> Config {
    let mut config = Config::default();
    config.search.search_term = term.to_string();
    config.search.regex_pattern = pattern.to_string();
    config.limits.politeness_delay = 10; // Very short for testing
    config.limits.fetch_timeout = 2_000;
    config.source.api_url = server.uri();
    config.source.item_url = format!("{}/item", server.uri());
    config
}

/// One search API hit
pub fn hit(id: &str, title: &str, replies: u64) -> Value {
    json!({
        "title": title,
        "url": format!("https://example.com/{}", id),
        "objectID": id,
        "points": 10,
        "num_comments": replies,
        "created_at_i": 1_700_000_000,
    })
}

/// A search API response body for page `page` of `nb_pages`
pub fn search_body(hits: Vec<Value>, page: u64, nb_pages: u64) -> Value {
    json!({
        "hits": hits,
        "page": page,
        "nbPages": nb_pages,
        "hitsPerPage": 20,
    })
}
