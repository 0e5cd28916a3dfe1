//! HTTP adapter contract tests (Anthropic, Tenor) against a mock server.

use birthday_bot::adapters::ai::AnthropicAdapter;
use birthday_bot::adapters::integrations::TenorAdapter;
use birthday_bot::domain::{DomainError, GenerationRequest};
use birthday_bot::ports::{MediaSearch, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerationRequest {
    GenerationRequest {
        prompt: "Write a short, cheerful birthday message.".into(),
        max_tokens: 150,
        temperature: 0.9,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_anthropic_request_and_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-test",
            "max_tokens": 150,
            "messages": [{"role": "user", "content": "Write a short, cheerful birthday message."}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "Another trip around the sun! 🌞\n"}],
            "stop_reason": "end_turn"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = AnthropicAdapter::new(server.uri(), "test-key".into(), "claude-test".into());
    let text = adapter.generate(&request()).await.unwrap();
    assert_eq!(text, "Another trip around the sun! 🌞");
}

#[tokio::test]
async fn test_anthropic_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        })))
        .mount(&server)
        .await;

    let adapter = AnthropicAdapter::new(server.uri(), "k".into(), "m".into());
    let err = adapter.generate(&request()).await.unwrap_err();
    assert!(matches!(err, DomainError::TextGen(_)));
    assert!(err.to_string().contains("529"), "{}", err);
}

#[tokio::test]
async fn test_anthropic_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let adapter = AnthropicAdapter::new(server.uri(), "k".into(), "m".into());
    assert!(matches!(
        adapter.generate(&request()).await,
        Err(DomainError::TextGen(_))
    ));
}

#[tokio::test]
async fn test_anthropic_no_text_block() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .mount(&server)
        .await;

    let adapter = AnthropicAdapter::new(server.uri(), "k".into(), "m".into());
    assert!(adapter.generate(&request()).await.is_err());
}

// ────────────────────────────────────────────────────────────────────────────
// Tenor
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_tenor_search_query_and_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "birthday celebration"))
        .and(query_param("key", "tenor-key"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"media_formats": {"gif": {"url": "https://media.tenor.com/1.gif"}}},
                {"media_formats": {"gif": {"url": "https://media.tenor.com/2.gif"}}},
                {"media_formats": {"gif": {"url": "https://media.tenor.com/3.gif"}}}
            ],
            "next": "3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = TenorAdapter::new(server.uri(), "tenor-key".into());
    let results = adapter.search("birthday celebration", 10).await.unwrap();
    let urls: Vec<_> = results.iter().filter_map(|r| r.gif_url.as_deref()).collect();
    assert_eq!(
        urls,
        [
            "https://media.tenor.com/1.gif",
            "https://media.tenor.com/2.gif",
            "https://media.tenor.com/3.gif"
        ]
    );
}

#[tokio::test]
async fn test_tenor_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [], "next": ""})))
        .mount(&server)
        .await;

    let adapter = TenorAdapter::new(server.uri(), "k".into());
    assert!(adapter.search("cake", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tenor_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let adapter = TenorAdapter::new(server.uri(), "bad".into());
    let err = adapter.search("cake", 10).await.unwrap_err();
    assert!(matches!(err, DomainError::Media(_)));
    assert!(err.to_string().contains("403"), "{}", err);
}

#[tokio::test]
async fn test_media_picker_degrades_on_tenor_error() {
    use birthday_bot::usecases::MediaPicker;
    use std::sync::Arc;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let picker = MediaPicker::new(
        Arc::new(TenorAdapter::new(server.uri(), "k".into())),
        "birthday".into(),
        10,
    );
    assert_eq!(picker.pick().await, None);
}
