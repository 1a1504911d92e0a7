//! Structured logging and secret-redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the application and
//! keeps Google API keys out of logged upstream payloads.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{RelayError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static SANITIZE: AtomicBool = AtomicBool::new(true);

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    SANITIZE.store(config.sanitize_secrets, Ordering::Relaxed);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    installed.map_err(|e| RelayError::Config(format!("Failed to install logger: {}", e)))
}

/// Sanitizes Google API keys from a string before it is logged.
///
/// Redacts bare keys (`AIza` followed by the key body) and `key=` query
/// parameters. Returns the input unchanged when sanitization is disabled.
pub fn sanitize(input: &str) -> String {
    if !SANITIZE.load(Ordering::Relaxed) {
        return input.to_string();
    }

    let result = redact_after(input, "AIza", "[REDACTED_API_KEY]");
    redact_after(&result, "key=", "key=[REDACTED]")
}

/// Replace every occurrence of `marker` plus the token following it with `replacement`.
fn redact_after(input: &str, marker: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let (before, from_marker) = rest.split_at(pos);
        result.push_str(before);

        let token_start = marker.len();
        let token_end = from_marker[token_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .map(|i| token_start + i)
            .unwrap_or(from_marker.len());

        result.push_str(replacement);
        rest = &from_marker[token_end..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_api_key() {
        let input = "API key AIzaSyD-abc_123XYZ is invalid";
        let output = sanitize(input);
        assert_eq!(output, "API key [REDACTED_API_KEY] is invalid");
    }

    #[test]
    fn test_sanitize_query_parameter() {
        let input = "GET /v1beta/models?key=secret123&alt=json";
        let output = sanitize(input);
        assert_eq!(output, "GET /v1beta/models?key=[REDACTED]&alt=json");
    }

    #[test]
    fn test_sanitize_multiple_occurrences() {
        let output = sanitize("AIzaOne and AIzaTwo");
        assert!(!output.contains("One"));
        assert!(!output.contains("Two"));
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize("nothing to see"), "nothing to see");
    }
}
