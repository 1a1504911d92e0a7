// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, ASK_DURATION, ASK_REQUESTS, MODEL_CALLS, MODEL_CALL_DURATION,
    NORMALIZATION_FAILURES,
};

/// Helper to record a finished `/ask` request
pub fn record_ask(input: &str, outcome: &str, duration_secs: f64) {
    ASK_REQUESTS.with_label_values(&[input, outcome]).inc();
    ASK_DURATION.with_label_values(&[input]).observe(duration_secs);
}

/// Helper to record Gemini API call metrics
pub fn record_model_call(model: &str, status: &str, duration_secs: f64) {
    MODEL_CALLS.with_label_values(&[model, status]).inc();
    MODEL_CALL_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

/// Helper to record a reply the normalizer rejected
pub fn record_normalization_failure(kind: &str) {
    NORMALIZATION_FAILURES.with_label_values(&[kind]).inc();
}
