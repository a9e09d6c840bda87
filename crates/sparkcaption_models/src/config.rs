//! Provider configuration.
//!
//! The API key is resolved once, when the configuration is built, and then
//! injected into the client. Nothing reads the environment after that.

use crate::RetryConfig;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use sparkcaption_error::{ConfigError, SparkResult};
use std::path::Path;
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

/// Environment variable holding the OpenRouter API key.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Older variable name, still honored when [`API_KEY_ENV`] is unset.
pub const LEGACY_API_KEY_ENV: &str = "VITE_OPENROUTER_API_KEY";
/// OpenRouter's OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Model used for captions.
pub const DEFAULT_TEXT_MODEL: &str = "google/gemini-2.0-flash-exp:free";
/// Model used for image generation.
pub const DEFAULT_IMAGE_MODEL: &str = "google/gemini-3-pro-image-preview";

const BASE_URL_ENV: &str = "OPENROUTER_BASE_URL";
const TEXT_MODEL_ENV: &str = "SPARKCAPTION_TEXT_MODEL";
const IMAGE_MODEL_ENV: &str = "SPARKCAPTION_IMAGE_MODEL";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Settings for [`crate::OpenRouterClient`].
///
/// # Examples
///
/// ```
/// use sparkcaption_models::{DEFAULT_TEXT_MODEL, ProviderConfig};
///
/// let config = ProviderConfig::builder().api_key("sk-test").build();
/// assert_eq!(config.text_model(), DEFAULT_TEXT_MODEL);
/// assert_eq!(config.retry().max_attempts, 4);
/// assert!(!format!("{:?}", config).contains("sk-test"));
/// ```
#[derive(Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct ProviderConfig {
    /// Bearer token sent with every request
    #[serde(default, skip_serializing)]
    #[builder(setter(into))]
    api_key: String,
    /// API root, without the `/chat/completions` suffix
    #[serde(default = "default_base_url")]
    #[builder(default = default_base_url(), setter(into))]
    base_url: String,
    /// Model used for captions and streaming
    #[serde(default = "default_text_model")]
    #[builder(default = default_text_model(), setter(into))]
    text_model: String,
    /// Model used for image generation
    #[serde(default = "default_image_model")]
    #[builder(default = default_image_model(), setter(into))]
    image_model: String,
    /// Timeout for single-shot requests
    #[serde(default = "default_timeout_secs")]
    #[builder(default = default_timeout_secs())]
    request_timeout_secs: u64,
    /// Rate-limit retry policy
    #[serde(default)]
    #[builder(default)]
    retry: RetryConfig,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ProviderConfig {
    /// Builds a configuration from the process environment.
    ///
    /// Loads a `.env` file first when one exists.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is set.
    #[instrument]
    pub fn from_env() -> SparkResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SparkResult<Self> {
        let api_key = resolve_api_key(&lookup)?;
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self::builder()
            .api_key(api_key)
            .base_url(non_blank(BASE_URL_ENV).unwrap_or_else(default_base_url))
            .text_model(non_blank(TEXT_MODEL_ENV).unwrap_or_else(default_text_model))
            .image_model(non_blank(IMAGE_MODEL_ENV).unwrap_or_else(default_image_model))
            .build())
    }

    /// Loads a TOML configuration file.
    ///
    /// The file may leave out `api_key`; it is then resolved from the
    /// environment as in [`ProviderConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed, or
    /// if no API key is available.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> SparkResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.api_key.trim().is_empty() {
            let _ = dotenvy::dotenv();
            config.api_key = resolve_api_key(&|name: &str| std::env::var(name).ok())?;
        }

        debug!(text_model = %config.text_model, "Loaded provider configuration");
        Ok(config)
    }

    /// Returns a copy that uses a different text model.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Returns a copy with a different retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

fn resolve_api_key(lookup: &impl Fn(&str) -> Option<String>) -> SparkResult<String> {
    [API_KEY_ENV, LEGACY_API_KEY_ENV]
        .into_iter()
        .filter_map(lookup)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| {
            ConfigError::new(format!(
                "OpenRouter API key not found. Set {} in your environment or .env file",
                API_KEY_ENV
            ))
            .into()
        })
}
