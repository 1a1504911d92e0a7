// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{RelayError, Result};
use crate::intake::{self, ImageUpload, IMAGE_FIELD};
use crate::metrics;
use crate::models::ModelRequest;
use crate::normalize::normalize_reply;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub text_model: String,
    pub vision_model: String,
    pub strict_schema: bool,
    pub timestamp: String,
}

/// Serves the static single-page UI
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (text_model, vision_model) = state.backend.models();

    Json(HealthResponse {
        status: "ok".to_string(),
        text_model: text_model.to_string(),
        vision_model: vision_model.to_string(),
        strict_schema: state.config.validation.strict_schema,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

/// Handler for `POST /ask`.
///
/// Multipart requests carrying an `image` part take the image path; anything
/// else is treated as a JSON `{"message": ...}` body. Every failure becomes a
/// `{"error": ...}` body with 400 (bad input) or 500 (model or reply failure).
pub async fn ask_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();

    let (input, result) = match read_model_request(&state, request).await {
        Ok(model_request) => {
            let input = model_request.input_kind();
            (input, answer(&state, &model_request).await)
        }
        Err(e) => (input_kind_of(&e), Err(e)),
    };

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_ask(input, outcome, start.elapsed().as_secs_f64());

    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            if e.status_code() == StatusCode::BAD_REQUEST {
                info!(input, kind = e.kind(), "Rejected /ask request: {}", e);
            } else {
                error!(input, kind = e.kind(), "Failed /ask request: {}", e);
            }
            e.into_response()
        }
    }
}

/// Input adapter stage: build the model request from the HTTP request.
async fn read_model_request(state: &AppState, request: Request) -> Result<ModelRequest> {
    if is_multipart(request.headers()) {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| RelayError::Unexpected(e.body_text()))?;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(IMAGE_FIELD) {
                continue;
            }

            info!("Receiving image...");
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;

            return intake::image_request(
                ImageUpload {
                    filename,
                    content_type,
                    data,
                },
                &state.config.limits,
            );
        }

        // A form without an image is not a JSON body either
        debug!("Multipart request without an image part");
        return Err(RelayError::NoInput);
    }

    // An oversized or unreadable body is as good as no input
    let body = axum::body::to_bytes(request.into_body(), state.config.limits.max_body_bytes)
        .await
        .map_err(|e| {
            debug!("Failed to read request body: {}", e);
            RelayError::NoInput
        })?;

    intake::text_request(&body)
}

/// Model call plus response normalizer stage.
async fn answer(state: &AppState, request: &ModelRequest) -> Result<Value> {
    let raw = state.backend.generate(request).await?;
    debug!("Raw response from AI: {}", raw);

    let reply = normalize_reply(&raw).map_err(|e| {
        metrics::record_normalization_failure(e.kind());
        e
    })?;

    if state.config.validation.strict_schema {
        reply.to_report().map_err(|e| {
            metrics::record_normalization_failure(e.kind());
            e
        })?;
    }

    Ok(reply.into_value())
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
}

fn multipart_error(e: MultipartError) -> RelayError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::TooLarge
    } else {
        RelayError::Unexpected(e.body_text())
    }
}

/// Best guess at the input path for requests rejected before one was chosen.
fn input_kind_of(error: &RelayError) -> &'static str {
    match error {
        RelayError::EmptyFile | RelayError::TooLarge | RelayError::UnsupportedFormat(_) => "image",
        RelayError::NoInput | RelayError::NoMessage => "text",
        _ => "unknown",
    }
}
