// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    generate_from_audio_handler, generate_from_document_handler, generate_from_image_handler,
    generate_text_handler, health_handler, metrics_handler,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    // Uploads are unbounded unless a limit is configured
    let body_limit = match config.server.max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let state = AppState {
        config,
        gemini_client: Arc::new(gemini_client),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/generate-text", post(generate_text_handler))
        .route("/generate-from-image", post(generate_from_image_handler))
        .route("/generate-from-document", post(generate_from_document_handler))
        .route("/generate-from-audio", post(generate_from_audio_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        // Every response echoes the request's x-request-id
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state);

    Ok(app)
}
