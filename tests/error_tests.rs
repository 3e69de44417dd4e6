// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use gemini_relay::error::RelayError;
use gemini_relay::models::MediaKind;
use http_body_util::BodyExt;
use serde_json::{json, Value};

async fn render(error: RelayError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        RelayError::NoUploads(MediaKind::Image),
        RelayError::InvalidRequest("Unexpected field".to_string()),
        RelayError::GeminiApi("API error".to_string()),
        RelayError::Config("missing key".to_string()),
        RelayError::Internal("boom".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[tokio::test]
async fn test_no_uploads_renders_400() {
    let (status, body) = render(RelayError::NoUploads(MediaKind::Document)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No documents uploaded."}));
}

#[tokio::test]
async fn test_upstream_error_renders_500_with_raw_message() {
    let (status, body) = render(RelayError::GeminiApi("quota exceeded".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "quota exceeded"}));
}

#[tokio::test]
async fn test_json_error_renders_500() {
    let json_error = serde_json::from_str::<Value>("{").unwrap_err();
    let message = json_error.to_string();

    let (status, body) = render(RelayError::from(json_error)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], message);
}

#[tokio::test]
async fn test_error_body_has_only_error_field() {
    let (_, body) = render(RelayError::Internal("boom".to_string())).await;
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["error"], "Internal error: boom");
}
