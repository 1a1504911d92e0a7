// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{ask_handler, health_handler, index_handler, metrics_handler};
use super::middleware::{panic_layer, request_id_layers};
use crate::backend::ModelBackend;
use crate::config::AppConfig;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Read-only context shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn ModelBackend>,
}

pub fn create_router(config: AppConfig, backend: Arc<dyn ModelBackend>) -> Router {
    let body_limit = config.limits.max_body_bytes;
    let state = AppState {
        config: Arc::new(config),
        backend,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/", get(index_handler))
        .route("/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // Room for a full-size image plus multipart framing
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(panic_layer())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
