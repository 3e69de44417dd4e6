// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    ATTACHMENTS_TOTAL,
    GEMINI_API_CALLS,
    GEMINI_API_DURATION,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
};

use crate::models::MediaKind;

/// Helper to record request metrics
pub fn record_request(endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

/// Helper to record Gemini API call metrics
pub fn record_gemini_call(model: &str, status_code: u16, duration_secs: f64) {
    GEMINI_API_CALLS
        .with_label_values(&[model, &status_code.to_string()])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

/// Helper to record forwarded uploads
pub fn record_attachments(kind: MediaKind, count: usize) {
    if count > 0 {
        ATTACHMENTS_TOTAL
            .with_label_values(&[kind.field_name()])
            .inc_by(count as f64);
    }
}
