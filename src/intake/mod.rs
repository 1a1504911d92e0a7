//! Input adapter: turns an inbound `/ask` request into a [`ModelRequest`].
//!
//! Two paths exist. An uploaded `image` part is validated (name, size,
//! extension) and attached to the image prompt. Otherwise the body is read
//! as JSON and its `message` is embedded in the text prompt.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod prompt;

use crate::config::LimitsConfig;
use crate::error::{RelayError, Result};
use crate::models::{Attachment, ModelRequest};
use crate::vision::{resolve_media_type, validate_upload};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info};

/// Multipart field carrying the injury photo.
pub const IMAGE_FIELD: &str = "image";

/// An uploaded file part, fully read.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Build the image-path request, validating the upload first.
pub fn image_request(upload: ImageUpload, limits: &LimitsConfig) -> Result<ModelRequest> {
    info!(
        filename = %upload.filename,
        content_type = upload.content_type.as_deref().unwrap_or("<none>"),
        size = upload.data.len(),
        "Image received"
    );

    let format = validate_upload(&upload.filename, upload.data.len(), limits.max_image_bytes)?;
    let media_type = resolve_media_type(upload.content_type.as_deref(), format);

    debug!(media_type = %media_type, "Image accepted");

    Ok(ModelRequest::Image {
        prompt: prompt::image_prompt(),
        attachment: Attachment {
            media_type,
            bytes: upload.data,
        },
    })
}

/// Build the text-path request from a raw body.
///
/// The body must be a non-empty JSON object; its `message` must be present
/// and non-empty (`null`, `""`, `0`, `false`, `[]` and `{}` count as empty).
/// Strings are embedded verbatim, other values as JSON text.
pub fn text_request(body: &[u8]) -> Result<ModelRequest> {
    let parsed: Value = serde_json::from_slice(body).map_err(|e| {
        debug!("Body is not JSON: {}", e);
        RelayError::NoInput
    })?;

    let fields = match parsed {
        Value::Object(fields) if !fields.is_empty() => fields,
        _ => return Err(RelayError::NoInput),
    };

    let message = match fields.get("message") {
        Some(value) if is_empty_message(value) => return Err(RelayError::NoMessage),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => return Err(RelayError::NoMessage),
    };

    debug!(chars = message.chars().count(), "Injury description received");

    Ok(ModelRequest::Text {
        prompt: prompt::text_prompt(&message),
    })
}

fn is_empty_message(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(true) => false,
    }
}
