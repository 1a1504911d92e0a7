// Shared test helpers
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use first_aid_relay::backend::ModelBackend;
use first_aid_relay::config::AppConfig;
use first_aid_relay::error::{RelayError, Result};
use first_aid_relay::models::{Attachment, ModelRequest};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

pub const BOUNDARY: &str = "relay-test-boundary";

/// Fake model that returns a canned reply and remembers what it was asked.
pub struct ScriptedBackend {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, request: ModelRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map_err(RelayError::ModelApi)
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate_from_text(&self, prompt: &str) -> Result<String> {
        self.respond(ModelRequest::Text {
            prompt: prompt.to_string(),
        })
    }

    async fn generate_from_image(&self, prompt: &str, image: &Attachment) -> Result<String> {
        self.respond(ModelRequest::Image {
            prompt: prompt.to_string(),
            attachment: image.clone(),
        })
    }

    async fn check_connectivity(&self) -> Result<Duration> {
        Ok(Duration::ZERO)
    }

    fn models(&self) -> (&str, &str) {
        ("fake-text", "fake-vision")
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::default()
        .with_api_key_fallback(Some("test-key".to_string()))
        .validate()
        .unwrap()
}

pub fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Multipart request with a single file part.
pub fn upload_request(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/ask")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
