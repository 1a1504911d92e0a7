// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // ASK METRICS
    // ============================================================================

    /// Total `/ask` requests by input path and outcome
    pub static ref ASK_REQUESTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("ask_requests_total", "Total number of /ask requests"),
        &["input", "outcome"], // input: text, image, unknown; outcome: ok or error kind
        REGISTRY
    ).unwrap();

    /// `/ask` duration histogram
    pub static ref ASK_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("ask_duration_seconds", "End-to-end /ask duration in seconds")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["input"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // MODEL METRICS
    // ============================================================================

    /// Total upstream model calls
    pub static ref MODEL_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("model_calls_total", "Total Gemini API calls"),
        &["model", "status"],
        REGISTRY
    ).unwrap();

    /// Upstream model call duration
    pub static ref MODEL_CALL_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("model_call_duration_seconds", "Gemini API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // NORMALIZATION METRICS
    // ============================================================================

    /// Model replies rejected by the normalizer
    pub static ref NORMALIZATION_FAILURES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("normalization_failures_total", "Model replies rejected during normalization"),
        &["kind"], // kind: malformed_json, missing_fields, schema_mismatch
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
