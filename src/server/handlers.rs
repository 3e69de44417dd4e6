// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::multipart::MediaUpload;
use super::routes::AppState;
use crate::error::{RelayError, Result};
use crate::models::{ContentPayload, MediaKind};
use crate::translation::extract_result;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize)]
pub struct GenerateTextRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Success body shared by every generation endpoint. `result` is usually a
/// string but carries whatever the upstream put at the answer path.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub api_base: String,
    pub timestamp: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model: state.gemini_client.model().to_string(),
        api_base: state.config.gemini.api_base_url.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

/// Handler for /generate-text
///
/// The prompt is forwarded exactly as received; a missing prompt is not
/// rejected here. Bodies that are not `application/json` are ignored, which
/// leaves the prompt unset.
pub async fn generate_text_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GenerateResponse>> {
    tracked("/generate-text", async move {
        let req = if is_json(&headers) {
            parse_text_request(&body)?
        } else {
            debug!("Ignoring non-JSON generate-text body");
            GenerateTextRequest::default()
        };
        info!(
            "Received generate-text request: prompt_chars={}",
            req.prompt.as_deref().map(|p| p.chars().count()).unwrap_or(0)
        );

        relay(&state, ContentPayload::text(req.prompt)).await
    })
    .await
}

pub async fn generate_from_image_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>> {
    media_handler(MediaKind::Image, state, multipart).await
}

pub async fn generate_from_document_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>> {
    media_handler(MediaKind::Document, state, multipart).await
}

pub async fn generate_from_audio_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>> {
    media_handler(MediaKind::Audio, state, multipart).await
}

/// Shared flow of the three media endpoints.
///
/// A request that is not multipart at all carries no files and is answered
/// like an empty upload.
async fn media_handler(
    kind: MediaKind,
    state: AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>> {
    tracked(kind.endpoint(), async move {
        let upload = match multipart {
            Ok(multipart) => MediaUpload::collect(kind, multipart).await?,
            Err(rejection) => {
                debug!("No multipart body on {}: {}", kind.endpoint(), rejection);
                MediaUpload::default()
            }
        };

        info!(
            "Received {} request: files={}, prompt={}",
            kind.endpoint(),
            upload.attachments.len(),
            upload.prompt.is_some()
        );

        let payload = ContentPayload::media(kind, upload.prompt.as_deref(), &upload.attachments)?;
        crate::metrics::record_attachments(kind, payload.attachment_count());

        relay(&state, payload).await
    })
    .await
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .map(|mime| mime.essence_str().eq_ignore_ascii_case(mime::APPLICATION_JSON.essence_str()))
        .unwrap_or(false)
}

fn parse_text_request(body: &[u8]) -> Result<GenerateTextRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateTextRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        debug!("Failed to deserialize generate-text body: {}", e);
        RelayError::InvalidRequest(e.to_string())
    })
}

/// One upstream call, then text extraction.
async fn relay(state: &AppState, payload: ContentPayload) -> Result<Value> {
    let response = state.gemini_client.generate_content(payload).await?;
    Ok(extract_result(&response))
}

/// Run an endpoint body, record its outcome and wrap the answer.
async fn tracked<F>(endpoint: &str, work: F) -> Result<Json<GenerateResponse>>
where
    F: Future<Output = Result<Value>>,
{
    let started = Instant::now();
    let result = work.await;

    let status = match &result {
        Ok(_) => 200,
        Err(e) => {
            debug!("{} failed: {}", endpoint, crate::utils::logging::sanitize(&e.to_string()));
            e.status_code().as_u16()
        }
    };
    crate::metrics::record_request(endpoint, status, started.elapsed().as_secs_f64());

    result.map(|result| Json(GenerateResponse { result }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_request() {
        let req = parse_text_request(br#"{"prompt":"hello"}"#).unwrap();
        assert_eq!(req.prompt.as_deref(), Some("hello"));

        let req = parse_text_request(br#"{"other":1}"#).unwrap();
        assert_eq!(req.prompt, None);

        let req = parse_text_request(b"  ").unwrap();
        assert_eq!(req.prompt, None);
    }

    #[test]
    fn test_is_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&headers));

        headers.insert(header::CONTENT_TYPE, "Application/JSON".parse().unwrap());
        assert!(is_json(&headers));

        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!is_json(&headers));
    }

    #[test]
    fn test_parse_text_request_rejects_malformed_json() {
        let err = parse_text_request(b"{not json").unwrap_err();
        assert!(matches!(err, RelayError::InvalidRequest(_)));
    }
}
