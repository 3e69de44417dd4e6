// Error types for gemini-relay
// Author: kelexine (https://github.com/kelexine)

use crate::models::MediaKind;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("No {0} uploaded.")]
    NoUploads(MediaKind),

    #[error("{0}")]
    InvalidRequest(String),

    /// Upstream failure; the message is relayed to the caller verbatim.
    #[error("{0}")]
    GeminiApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::NoUploads(_) | RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Every failure reaches the caller as `{"error": "<message>"}`
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_uploads_messages() {
        assert_eq!(RelayError::NoUploads(MediaKind::Image).to_string(), "No images uploaded.");
        assert_eq!(
            RelayError::NoUploads(MediaKind::Document).to_string(),
            "No documents uploaded."
        );
        assert_eq!(RelayError::NoUploads(MediaKind::Audio).to_string(), "No audios uploaded.");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RelayError::NoUploads(MediaKind::Image).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::InvalidRequest("Unexpected field".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::GeminiApi("quota exceeded".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_message_is_not_decorated() {
        let error = RelayError::GeminiApi("quota exceeded".to_string());
        assert_eq!(error.to_string(), "quota exceeded");
    }
}
