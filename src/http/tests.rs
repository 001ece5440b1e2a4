//! Tests for the HTTP transport

use super::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_headers() -> HashMap<String, String> {
    HashMap::from([
        ("X-Platform".to_string(), "web".to_string()),
        (
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        ),
    ])
}

#[tokio::test]
async fn test_post_returns_decoded_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/entities:search"))
        .and(header("X-Platform", "web"))
        .and(body_partial_json(json!({"pageToken": "v1:0"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "meta": {"nextPageToken": ""}
        })))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let url = format!("{}/v2/entities:search", server.uri());
    let (status, body) = transport
        .post(&url, &page_headers(), &json!({"pageToken": "v1:0"}))
        .await
        .unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["meta"]["nextPageToken"], "");
}

#[tokio::test]
async fn test_post_preserves_non_ascii_body() {
    let server = MockServer::start().await;

    // The matcher decodes the raw request bytes; this only passes when the
    // keyword crossed the wire as literal UTF-8.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"keyword": "一眼レフ"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let (status, _) = transport
        .post(&server.uri(), &page_headers(), &json!({"keyword": "一眼レフ"}))
        .await
        .unwrap();

    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_non_success_status_is_returned_with_snippet() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let (status, body) = transport
        .post(&server.uri(), &page_headers(), &json!({}))
        .await
        .unwrap();

    assert_eq!(status, 503);
    assert_eq!(body, JsonValue::String("upstream unavailable".to_string()));
}

#[tokio::test]
async fn test_garbage_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let err = transport
        .post(&server.uri(), &page_headers(), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_connection_failure_is_retryable() {
    // Nothing listens on port 1.
    let transport = HttpTransport::with_timeout(Duration::from_secs(1));
    let err = transport
        .post("http://127.0.0.1:1/", &page_headers(), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_retryable());
}
