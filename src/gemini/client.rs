// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::backend::ModelBackend;
use crate::config::GeminiConfig;
use crate::error::{RelayError, Result};
use crate::metrics;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::models::Attachment;
use crate::utils::logging::sanitize;
use crate::vision::to_inline_data;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the public Google Gemini REST API.
///
/// One instance is built at startup and shared read-only by all requests.
/// Every call is a single `generateContent` round trip; failures are
/// returned immediately and never retried.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client with a pooled rustls HTTP client.
    pub fn new(config: &GeminiConfig, api_key: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Gemini HTTP client");

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            model
        )
    }

    /// Call `generateContent` and return the parsed envelope.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
        model: &str,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!("Calling generateContent API for model: {}", model);

        let start = Instant::now();
        let result = self.send(&url, request, None).await;
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(_) => metrics::record_model_call(model, "ok", elapsed),
            Err(_) => metrics::record_model_call(model, "error", elapsed),
        }

        result
    }

    async fn send(
        &self,
        url: &str,
        request: &GenerateContentRequest,
        timeout: Option<Duration>,
    ) -> Result<GenerateContentResponse> {
        let mut builder = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RelayError::ModelApi(format!("HTTP error: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| RelayError::ModelApi(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let body = sanitize(&response_text);
            error!("Gemini API error: HTTP {} - Response body: {}", status, body);
            let message = Self::extract_error_message(&response_text)
                .map(|m| sanitize(&m))
                .unwrap_or(body);
            return Err(RelayError::ModelApi(format!("HTTP {}: {}", status.as_u16(), message)));
        }

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            RelayError::ModelApi(format!("Response parsing error: {}", e))
        })
    }

    /// Call a model and pull the reply text out of the envelope.
    async fn complete(&self, model: &str, parts: Vec<Part>) -> Result<String> {
        let request = GenerateContentRequest::user(parts);
        let response = self.generate_content(&request, model).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                model,
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "Gemini token usage"
            );
        }

        if let Some(reason) = response.block_reason() {
            return Err(RelayError::ModelApi(format!("Prompt blocked by Gemini: {}", reason)));
        }

        response.text().ok_or_else(|| {
            let reason = response.finish_reason().unwrap_or("UNKNOWN");
            RelayError::ModelApi(format!(
                "Gemini returned no text (finish reason: {})",
                reason
            ))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        let error = serde_json::from_str::<ErrorResponse>(response_text).ok()?.error?;
        error.message.or(error.status)
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    async fn generate_from_text(&self, prompt: &str) -> Result<String> {
        let reply = self
            .complete(&self.config.text_model, vec![Part::text(prompt)])
            .await?;
        info!("Received response from Gemini text model");
        Ok(reply)
    }

    async fn generate_from_image(&self, prompt: &str, image: &Attachment) -> Result<String> {
        info!("Calling Gemini Vision API...");
        let parts = vec![
            Part::text(prompt),
            Part::InlineData {
                inline_data: to_inline_data(image),
            },
        ];
        let reply = self.complete(&self.config.vision_model, parts).await?;
        info!("Received response from Gemini Vision API");
        Ok(reply)
    }

    /// Sends a minimal "hi" request to the text model.
    async fn check_connectivity(&self) -> Result<Duration> {
        let url = self.endpoint(&self.config.text_model);
        debug!("Checking connectivity via {}", url);

        let mut request = GenerateContentRequest::user(vec![Part::text("hi")]);
        request.generation_config = Some(GenerationConfig {
            max_output_tokens: Some(1),
            ..Default::default()
        });

        let start = Instant::now();
        self.send(&url, &request, Some(Duration::from_secs(10))).await?;
        let latency = start.elapsed();

        debug!("API connectivity check passed in {:?}", latency);
        Ok(latency)
    }

    fn models(&self) -> (&str, &str) {
        (&self.config.text_model, &self.config.vision_model)
    }
}
