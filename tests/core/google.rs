//! Tests for the Google Custom Search client against a mock server

use gemini_relay::core::config::SearchConfig;
use gemini_relay::core::error::RelayError;
use gemini_relay::core::search::{GoogleSearchClient, SearchBackend, NO_RESULTS};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/customsearch/v1";

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig {
        base_url: format!("{}{SEARCH_PATH}", server.uri()),
        api_key: Some("search-key".to_string()),
        engine_id: Some("engine-id".to_string()),
        ..SearchConfig::default()
    }
}

#[tokio::test]
async fn test_site_scoped_query_and_formatting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("key", "search-key"))
        .and(query_param("cx", "engine-id"))
        .and(query_param("q", "site:docs.rs tokio spawn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "title": "spawn in tokio::task",
                    "link": "https://docs.rs/tokio/latest/tokio/task/fn.spawn.html",
                    "snippet": "Spawns a new asynchronous task."
                },
                {
                    "title": "JoinHandle",
                    "link": "https://docs.rs/tokio/latest/tokio/task/struct.JoinHandle.html",
                    "snippet": "An owned permission to join on a task."
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new(&config_for(&server)).unwrap();
    let result = client
        .search("  tokio spawn ", Some("docs.rs"))
        .await
        .unwrap();

    assert_eq!(result.hits.len(), 2);
    let text = result.formatted();
    assert!(text.starts_with("Search Results for \"site:docs.rs tokio spawn\":\n\n"));
    assert!(text.contains("1. \"spawn in tokio::task\"\n"));
    assert!(text.contains("   URL: https://docs.rs/tokio/latest/tokio/task/fn.spawn.html\n"));
    assert!(text.contains("2. \"JoinHandle\"\n"));
}

#[tokio::test]
async fn test_local_site_is_not_scoped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "axum routing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new(&config_for(&server)).unwrap();
    client
        .search("axum routing", Some("localhost:3000"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_items_is_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": { "totalResults": "0" }
        })))
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new(&config_for(&server)).unwrap();
    let result = client.search("nothing matches", None).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(result.formatted(), NO_RESULTS);
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid." }
        })))
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new(&config_for(&server)).unwrap();
    let err = client.search("anything", None).await.unwrap_err();

    match err {
        RelayError::SearchBackend { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unconfigured_fails_before_request() {
    let server = MockServer::start().await;
    let config = SearchConfig {
        base_url: format!("{}{SEARCH_PATH}", server.uri()),
        ..SearchConfig::default()
    };

    let client = GoogleSearchClient::new(&config).unwrap();
    let err = client.search("anything", None).await.unwrap_err();

    assert!(matches!(err, RelayError::SearchUnconfigured(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_query_is_rejected() {
    let server = MockServer::start().await;
    let client = GoogleSearchClient::new(&config_for(&server)).unwrap();

    let err = client.search("   ", Some("docs.rs")).await.unwrap_err();
    assert!(matches!(err, RelayError::InvalidQuery(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_verify_credentials_runs_test_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new(&config_for(&server)).unwrap();
    client.verify_credentials().await.unwrap();
}
