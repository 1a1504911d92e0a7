//! Capability interface for the generative model behind `/ask`.
//!
//! Handlers only see [`ModelBackend`], so the pipeline can run against the real
//! Gemini client in production and a scripted fake in tests.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::Result;
use crate::models::{Attachment, ModelRequest};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Complete a text-only prompt and return the model's raw reply.
    async fn generate_from_text(&self, prompt: &str) -> Result<String>;

    /// Complete a prompt with an attached image and return the model's raw reply.
    async fn generate_from_image(&self, prompt: &str, image: &Attachment) -> Result<String>;

    /// Verify the service is reachable and the credentials work.
    async fn check_connectivity(&self) -> Result<Duration>;

    /// Models used for text and image prompts, for health reporting.
    fn models(&self) -> (&str, &str);

    /// Dispatch a [`ModelRequest`] to the matching capability.
    async fn generate(&self, request: &ModelRequest) -> Result<String> {
        match request {
            ModelRequest::Text { prompt } => self.generate_from_text(prompt).await,
            ModelRequest::Image { prompt, attachment } => {
                self.generate_from_image(prompt, attachment).await
            }
        }
    }
}
