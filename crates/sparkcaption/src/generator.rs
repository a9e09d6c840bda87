//! Generation orchestrator.

use crate::prompt::{caption_messages, image_prompt, stream_messages};
use derive_getters::Getters;
use sparkcaption_core::{ChatMessage, ContentFormat, GeneratedContent, GenerationRequest};
use sparkcaption_error::{ProviderError, ProviderErrorKind, RetryableError, SparkError, SparkResult};
use sparkcaption_models::{
    ChatStream, ContentProvider, DEFAULT_TEXT_MODEL, OpenRouterClient, ProviderConfig, RawResponse,
    RetryConfig, StreamOptions, normalize_response, retry_on_rate_limit,
};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use typed_builder::TypedBuilder;

#[cfg(feature = "metrics")]
use crate::GenerationMetrics;

/// Progress callback. Receives short human-readable status lines.
pub type ProgressFn<'a> = dyn Fn(&str) + Send + Sync + 'a;

const DRAFTING: &str = "Drafting caption...";
const IMAGE_SKIPPED: &str = "Image generation skipped; generating caption only...";
const VIDEO_SKIPPED: &str = "Video generation skipped; generating caption only...";
const GENERATING_IMAGE: &str = "Generating image...";
const VIDEO_UNSUPPORTED: &str = "Video generation is not supported yet; generating caption only...";
const IMAGE_FAILED: &str = "Failed to generate image via OpenRouter.";

/// Orchestrator settings.
///
/// # Examples
///
/// ```
/// use sparkcaption::GeneratorConfig;
///
/// let config = GeneratorConfig::builder().text_model("openai/gpt-4o-mini").build();
/// assert_eq!(config.text_model(), "openai/gpt-4o-mini");
/// assert!(!config.visuals_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, TypedBuilder)]
pub struct GeneratorConfig {
    /// Model for caption and streaming calls
    #[builder(default = DEFAULT_TEXT_MODEL.to_string(), setter(into))]
    text_model: String,
    /// Rate-limit retry policy for caption calls
    #[builder(default)]
    retry: RetryConfig,
    /// Call the image model for posts
    #[builder(default)]
    visuals_enabled: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl From<&ProviderConfig> for GeneratorConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self::builder()
            .text_model(config.text_model().as_str())
            .retry(*config.retry())
            .build()
    }
}

/// Turns generation requests into captions using a [`ContentProvider`].
///
/// The generator holds no mutable state. Overlapping calls are independent.
pub struct Generator<P> {
    provider: P,
    config: GeneratorConfig,
    #[cfg(feature = "metrics")]
    metrics: GenerationMetrics,
}

impl Generator<OpenRouterClient> {
    /// Builds an OpenRouter-backed generator.
    ///
    /// # Errors
    ///
    /// Fails when the configuration carries no API key.
    pub fn from_provider_config(config: ProviderConfig) -> SparkResult<Self> {
        let generator_config = GeneratorConfig::from(&config);
        Ok(Self::new(OpenRouterClient::new(config)?, generator_config))
    }
}

impl<P: ContentProvider> Generator<P> {
    /// Creates a generator over `provider`.
    pub fn new(provider: P, config: GeneratorConfig) -> Self {
        debug!(
            provider = provider.provider_name(),
            model = %config.text_model,
            visuals_enabled = config.visuals_enabled,
            "Creating generator"
        );
        Self {
            provider,
            config,
            #[cfg(feature = "metrics")]
            metrics: GenerationMetrics::new(),
        }
    }

    /// Turns image generation for posts on or off.
    pub fn with_visuals(mut self, enabled: bool) -> Self {
        self.config.visuals_enabled = enabled;
        self
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current settings.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a caption, plus a visual when the format asks for one and
    /// visuals are enabled.
    ///
    /// The caption call and the visual task run concurrently. The first
    /// failure aborts both and is returned; no partial content is produced.
    ///
    /// # Errors
    ///
    /// Provider failures (after rate-limit retries), an empty response, or a
    /// failed image generation.
    #[instrument(
        skip(self, request, on_progress),
        fields(
            model = %self.config.text_model,
            platform = %request.platform(),
            format = %request.format(),
        )
    )]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        on_progress: Option<&ProgressFn<'_>>,
    ) -> SparkResult<GeneratedContent> {
        let started = Instant::now();
        let result = self.run(request, on_progress).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(content) => info!(
                elapsed_ms = elapsed.as_millis() as u64,
                hashtags = content.hashtags().len(),
                has_image = content.image_url().is_some(),
                "Generation completed"
            ),
            Err(e) => warn!(elapsed_ms = elapsed.as_millis() as u64, error = %e, "Generation failed"),
        }

        #[cfg(feature = "metrics")]
        self.metrics.record(result.is_ok(), elapsed);

        result
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        on_progress: Option<&ProgressFn<'_>>,
    ) -> SparkResult<GeneratedContent> {
        let messages = caption_messages(request);

        report(on_progress, DRAFTING);
        let (response, visual) = tokio::try_join!(
            self.draft_caption(&messages),
            self.visual(request, on_progress)
        )?;

        let content = normalize_response(&response)?;
        Ok(match (request.format(), visual) {
            (ContentFormat::Post, Some(url)) => content.with_image_url(url),
            (ContentFormat::Video, Some(url)) => content.with_video_url(url),
            _ => content,
        })
    }

    async fn draft_caption(&self, messages: &[ChatMessage]) -> SparkResult<RawResponse> {
        let provider = &self.provider;
        let model = self.config.text_model.as_str();

        retry_on_rate_limit(&self.config.retry, move || async move {
            let result = provider.send_chat(model, messages).await;
            if let Err(e) = &result {
                if e.is_rate_limited() {
                    self.note_rate_limited();
                }
            }
            result
        })
        .await
    }

    async fn visual(
        &self,
        request: &GenerationRequest,
        on_progress: Option<&ProgressFn<'_>>,
    ) -> SparkResult<Option<String>> {
        match (request.format(), self.config.visuals_enabled) {
            (ContentFormat::Caption, _) => Ok(None),
            (ContentFormat::Post, true) => {
                report(on_progress, GENERATING_IMAGE);
                self.first_image(request).await
            }
            (ContentFormat::Post, false) => {
                report(on_progress, IMAGE_SKIPPED);
                Ok(None)
            }
            (ContentFormat::Video, true) => {
                report(on_progress, VIDEO_UNSUPPORTED);
                Ok(None)
            }
            (ContentFormat::Video, false) => {
                report(on_progress, VIDEO_SKIPPED);
                Ok(None)
            }
        }
    }

    async fn first_image(&self, request: &GenerationRequest) -> SparkResult<Option<String>> {
        let urls = self
            .provider
            .generate_image(&image_prompt(request))
            .await
            .map_err(|e| {
                warn!(error = %e, "Image generation failed");
                image_failure()
            })?;

        let url = urls.into_iter().next();
        if url.is_none() {
            debug!("Image response carried no image URL");
        }
        Ok(url)
    }

    /// Streams a free-form response to `prompt`.
    ///
    /// Uses the configured text model unless `model` is given. The stream is
    /// not retried.
    ///
    /// # Errors
    ///
    /// Fails if the stream cannot be opened. Failures after that arrive as
    /// `Err` items.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn stream_generate(
        &self,
        prompt: &str,
        model: Option<&str>,
        options: StreamOptions,
    ) -> SparkResult<ChatStream> {
        let model = model.unwrap_or(self.config.text_model.as_str());
        info!(model, "Starting streaming generation");
        self.provider
            .stream_chat(model, &stream_messages(prompt), options)
            .await
    }

    fn note_rate_limited(&self) {
        #[cfg(feature = "metrics")]
        self.metrics.rate_limited.add(1, &[]);
    }
}

fn report(on_progress: Option<&ProgressFn<'_>>, status: &str) {
    debug!(status, "Progress");
    if let Some(callback) = on_progress {
        callback(status);
    }
}

#[track_caller]
fn image_failure() -> SparkError {
    ProviderError::new(ProviderErrorKind::ImageGeneration(IMAGE_FAILED.to_string())).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.text_model(), DEFAULT_TEXT_MODEL);
        assert_eq!(config.retry().max_attempts, 4);
        assert!(!config.visuals_enabled());
    }

    #[test]
    fn test_config_from_provider_config() {
        let provider = ProviderConfig::builder()
            .api_key("sk-test")
            .text_model("anthropic/claude-3.5-haiku")
            .retry(RetryConfig::no_retry())
            .build();
        let config = GeneratorConfig::from(&provider);
        assert_eq!(config.text_model(), "anthropic/claude-3.5-haiku");
        assert_eq!(config.retry().max_attempts, 1);
        assert!(!config.visuals_enabled());
    }

    #[test]
    fn test_image_failure_message() {
        let err = image_failure();
        assert!(err.to_string().contains(IMAGE_FAILED));
    }
}
