//! Structured logging and credential redaction.
//!
//! This module configures the `tracing` ecosystem for the application and
//! provides a helper that keeps Gemini API keys out of log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Redacts Google API keys from a log message.
///
/// Two patterns are covered:
/// - raw keys, which start with `AIza`
/// - `key=` query parameters, whatever their value
pub fn sanitize(input: &str) -> String {
    let result = redact_after(input, "key=", "[REDACTED_KEY]");
    redact_after(&result, "AIza", "[REDACTED_API_KEY]")
}

/// Replace every token that starts at `marker` (marker included for raw keys,
/// excluded for `key=` parameters) up to the next delimiter.
fn redact_after(input: &str, marker: &str, replacement: &str) -> String {
    let keep_marker = marker.ends_with('=');
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let value_start = pos + marker.len();
        let value_end = rest[value_start..]
            .find(is_delimiter)
            .map(|i| value_start + i)
            .unwrap_or(rest.len());

        output.push_str(&rest[..pos]);
        if keep_marker {
            output.push_str(marker);
        }
        output.push_str(replacement);
        rest = &rest[value_end..];
    }

    output.push_str(rest);
    output
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '&' | ',' | ')')
}
