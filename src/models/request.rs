// Per-request model input
// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;

/// Binary payload sent alongside the prompt on the image path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub media_type: String,
    pub bytes: Bytes,
}

/// What the intake stage hands to the model backend.
///
/// Built fresh for every HTTP request and consumed by a single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelRequest {
    Text { prompt: String },
    Image { prompt: String, attachment: Attachment },
}

impl ModelRequest {
    pub fn prompt(&self) -> &str {
        match self {
            ModelRequest::Text { prompt } | ModelRequest::Image { prompt, .. } => prompt,
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        match self {
            ModelRequest::Text { .. } => None,
            ModelRequest::Image { attachment, .. } => Some(attachment),
        }
    }

    /// Label for logs and metrics: `text` or `image`.
    pub fn input_kind(&self) -> &'static str {
        match self {
            ModelRequest::Text { .. } => "text",
            ModelRequest::Image { .. } => "image",
        }
    }
}
