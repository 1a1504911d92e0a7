//! Configuration data structures for the first-aid relay.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream Gemini connection, upload limits, reply validation
//! and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Upload and request body limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// How strictly model replies are checked.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5001`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key. Falls back to `GOOGLE_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the public Gemini REST API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model used for text descriptions.
    /// Default: `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub text_model: String,

    /// Model used for image uploads.
    /// Default: `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub vision_model: String,

    /// Request timeout in seconds. A timeout fails the whole request.
    /// Default: `120`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Size limits applied to inbound requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted image, in bytes. Exactly this size is accepted.
    /// Default: `10485760` (10 MiB)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Transport cap on the whole request body, in bytes.
    /// Must leave room above `max_image_bytes` for multipart framing.
    /// Default: `33554432` (32 MiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Validation applied to model replies after normalization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// Also check field types and the severity enum.
    /// Default: `false` (presence of the three fields is enough)
    #[serde(default)]
    pub strict_schema: bool,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask API keys in logged upstream payloads.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_secrets: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            text_model: default_model(),
            vision_model: default_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_secrets: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_body_bytes() -> usize {
    32 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
