// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{RelayError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini API key when none is configured.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (`FIRST_AID__SECTION__KEY`, highest)
    /// 2. Config file (`path`, or `~/.first-aid-relay/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// The API key falls back to `GOOGLE_API_KEY`. A missing key is an error:
    /// the relay refuses to start rather than call Gemini unauthenticated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(file_path).required(path.is_some()))
            .add_source(
                Environment::with_prefix("FIRST_AID")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        loaded
            .with_api_key_fallback(std::env::var(API_KEY_ENV).ok())
            .validate()
    }

    /// Fill `gemini.api_key` from `fallback` when it is unset or blank.
    pub fn with_api_key_fallback(mut self, fallback: Option<String>) -> Self {
        let configured = self
            .gemini
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !configured {
            self.gemini.api_key = fallback.filter(|key| !key.trim().is_empty());
        }
        self
    }

    /// Reject configurations the relay cannot serve with.
    pub fn validate(self) -> Result<Self> {
        if self.gemini.api_key.is_none() {
            return Err(RelayError::Config(format!(
                "no Gemini API key configured; set {} or gemini.api_key",
                API_KEY_ENV
            )));
        }
        if self.limits.max_body_bytes <= self.limits.max_image_bytes {
            return Err(RelayError::Config(format!(
                "limits.max_body_bytes ({}) must exceed limits.max_image_bytes ({})",
                self.limits.max_body_bytes, self.limits.max_image_bytes
            )));
        }
        Ok(self)
    }

    /// The configured API key. Only valid after [`AppConfig::validate`].
    pub fn api_key(&self) -> &str {
        self.gemini.api_key.as_deref().unwrap_or_default()
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".first-aid-relay")
            .join("config.toml")
    }
}
