// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::{GeminiConfig, GEMINI_MODEL};
use crate::error::{RelayError, Result};
use crate::models::ContentPayload;
use crate::utils::logging::sanitize;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error};

/// Client for the Gemini Generative Language API.
///
/// Built once at startup and shared by every handler. It holds no mutable
/// state, so concurrent requests need no synchronization.
pub struct GeminiClient {
    http_client: Client,
    api_base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for the fixed relay model.
    ///
    /// No request timeout is configured: a stalled upstream stalls the
    /// corresponding request.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: GEMINI_MODEL.to_string(),
        })
    }

    /// Get the model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, self.model)
    }

    /// Call `generateContent` once and return the raw response body.
    ///
    /// The body is kept untyped; callers run it through
    /// [`crate::translation::extract_result`].
    pub async fn generate_content(&self, payload: ContentPayload) -> Result<Value> {
        let url = self.endpoint();
        let request = payload.into_request();
        debug!(
            "Calling generateContent for model {} with {} content(s)",
            self.model,
            request.contents.len()
        );

        let started = Instant::now();
        let result = self.send(&url, &request).await;

        let status = match &result {
            Ok(_) => 200,
            Err((status, _)) => *status,
        };
        crate::metrics::record_gemini_call(&self.model, status, started.elapsed().as_secs_f64());

        result.map_err(|(status, message)| {
            error!("Gemini API error: HTTP {} - {}", status, sanitize(&message));
            RelayError::GeminiApi(message)
        })
    }

    async fn send(
        &self,
        url: &str,
        request: &crate::models::GenerateContentRequest,
    ) -> std::result::Result<Value, (u16, String)> {
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| (0, e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| (status.as_u16(), format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = Self::extract_error_message(&response_text).unwrap_or_else(|| {
                if response_text.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    response_text.clone()
                }
            });
            return Err((status.as_u16(), message));
        }

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text)
            .map_err(|e| (status.as_u16(), format!("Response parsing error: {}", e)))
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}
