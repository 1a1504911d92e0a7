// Error types for the first-aid relay
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("No image file selected")]
    EmptyFile,

    #[error("Image file too large. Please use an image smaller than 10MB.")]
    TooLarge,

    #[error("Unsupported image format. Please use: {0}")]
    UnsupportedFormat(String),

    #[error("No input provided")]
    NoInput,

    #[error("No message provided")]
    NoMessage,

    /// The upstream model call failed (transport, HTTP status, blocked prompt, empty reply).
    #[error("Error processing request with the AI model: {0}")]
    ModelApi(String),

    /// The model reply was not a JSON object after fence stripping.
    /// `raw` keeps the unmodified reply for diagnostics and never reaches the client.
    #[error("Invalid JSON format in AI model response")]
    MalformedJson { raw: String },

    #[error("Response missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Only produced when strict schema validation is enabled.
    #[error("Response fields have unexpected types: {0}")]
    SchemaMismatch(String),

    #[error("{0}")]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl RelayError {
    /// HTTP status for this error: input validation is the client's fault, everything else is ours.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::EmptyFile
            | RelayError::TooLarge
            | RelayError::UnsupportedFormat(_)
            | RelayError::NoInput
            | RelayError::NoMessage => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short stable label, used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::EmptyFile => "empty_file",
            RelayError::TooLarge => "too_large",
            RelayError::UnsupportedFormat(_) => "unsupported_format",
            RelayError::NoInput => "no_input",
            RelayError::NoMessage => "no_message",
            RelayError::ModelApi(_) => "model_api_error",
            RelayError::MalformedJson { .. } => "malformed_json",
            RelayError::MissingFields(_) => "missing_fields",
            RelayError::SchemaMismatch(_) => "schema_mismatch",
            _ => "unexpected",
        }
    }
}

// Convert RelayError to HTTP responses for Axum
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
