//! Tests for the Gemini generation client against a mock server

use gemini_relay::core::config::GenerationConfig;
use gemini_relay::core::error::RelayError;
use gemini_relay::core::generation::{GeminiClient, GenerationBackend, SamplingParams};
use gemini_relay::core::types::Turn;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let config = GenerationConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        ..GenerationConfig::default()
    };
    GeminiClient::new(&config).unwrap()
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    requests.last().unwrap().body_json().unwrap()
}

#[tokio::test]
async fn test_direct_sends_history_and_sampling_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "question" }] },
                { "role": "model", "parts": [{ "text": "first answer" }] }
            ],
            "generationConfig": { "topK": 40, "maxOutputTokens": 8192 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let history = vec![Turn::user("question"), Turn::model("first answer")];
    let text = client
        .direct(&history, &SamplingParams::default())
        .await
        .unwrap();
    assert_eq!(text, "hello");

    let body = last_body(&server).await;
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
    let top_p = body["generationConfig"]["topP"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
    assert!((top_p - 0.95).abs() < 1e-6);
}

#[tokio::test]
async fn test_direct_rejects_empty_history() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .direct(&[], &SamplingParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_session_sends_single_user_turn() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("from session")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client
        .chat_session("prompt text", &SamplingParams::default())
        .await
        .unwrap();
    assert_eq!(text, "from session");

    let body = last_body(&server).await;
    assert_eq!(
        body["contents"],
        json!([{ "role": "user", "parts": [{ "text": "prompt text" }] }])
    );
    assert!(body.get("generationConfig").is_some());
}

#[tokio::test]
async fn test_chat_session_keeps_history_across_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("reply")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = client.start_chat(SamplingParams::default());
    session.send_message("one").await.unwrap();
    session.send_message("two").await.unwrap();

    assert_eq!(session.history().len(), 4);
    let body = last_body(&server).await;
    assert_eq!(body["contents"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_simplified_sends_bare_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "plain" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client.simplified("flat prompt").await.unwrap();
    assert_eq!(text, "plain");

    let body = last_body(&server).await;
    assert_eq!(body, json!({ "contents": [{ "parts": [{ "text": "flat prompt" }] }] }));
}

#[tokio::test]
async fn test_multi_part_candidate_is_concatenated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client.simplified("x").await.unwrap();
    assert_eq!(text, "Hello, world");
}

#[tokio::test]
async fn test_blocked_prompt_is_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.simplified("x").await.unwrap_err();
    match err {
        RelayError::MalformedResponse(reason) => assert!(reason.contains("SAFETY")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_success_status_is_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource has been exhausted" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .direct(&[Turn::user("x")], &SamplingParams::default())
        .await
        .unwrap_err();
    match err {
        RelayError::Generation(message) => {
            assert!(message.contains("429"));
            assert!(message.contains("Resource has been exhausted"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_api_key_fails_without_request() {
    let server = MockServer::start().await;
    let config = GenerationConfig {
        base_url: server.uri(),
        ..GenerationConfig::default()
    };
    let client = GeminiClient::new(&config).unwrap();

    let err = client.simplified("x").await.unwrap_err();
    assert!(matches!(err, RelayError::Generation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
