//! HTTP client for OpenRouter.

use crate::openrouter::dto::{ErrorEnvelope, ImageResponse, StreamEvent};
use crate::openrouter::{ChatRequest, SseDecoder, SseEvent};
use crate::{ChatStream, ContentProvider, ProviderConfig, RawResponse, StreamOptions};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response};
use sparkcaption_core::{ChatMessage, StreamChunk};
use sparkcaption_error::{
    ConfigError, JsonError, ProviderError, ProviderErrorKind, SparkError, SparkResult,
};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

const PROVIDER_NAME: &str = "openrouter";

/// Client for OpenRouter's OpenAI-compatible chat completions API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    config: ProviderConfig,
}

impl OpenRouterClient {
    /// Creates a client from an already-resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is blank or the HTTP
    /// client cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: ProviderConfig) -> SparkResult<Self> {
        if config.api_key().trim().is_empty() {
            return Err(ConfigError::new(
                "OpenRouter API key not found. Set OPENROUTER_API_KEY in your environment or .env file",
            )
            .into());
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!(
            provider = PROVIDER_NAME,
            text_model = %config.text_model(),
            "Created OpenRouter client"
        );

        Ok(Self { client, config })
    }

    /// Creates a client with the API key resolved from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is set.
    pub fn from_env() -> SparkResult<Self> {
        Self::new(ProviderConfig::from_env()?)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url().trim_end_matches('/')
        )
    }

    /// Sends a request and checks the status; the body is left unread.
    async fn post(&self, body: &ChatRequest, streaming: bool) -> SparkResult<Response> {
        if body.model().trim().is_empty() {
            return Err(invalid_request("model must not be empty"));
        }
        if body.messages().is_empty() {
            return Err(invalid_request("at least one message is required"));
        }

        let mut request = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key())
            .json(body);
        if !streaming {
            request = request.timeout(Duration::from_secs(*self.config.request_timeout_secs()));
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = PROVIDER_NAME, error = ?e, "HTTP request failed");
            transport_error(&e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = retry_after(response.headers());
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or(body);

        error!(
            provider = PROVIDER_NAME,
            status = %status,
            retry_after = ?retry_after,
            error = %message,
            "API error"
        );

        Err(ProviderError::new(ProviderErrorKind::Api {
            status: status.as_u16(),
            message,
            retry_after,
        })
        .into())
    }

    /// Sends a single-shot request and returns the decoded JSON body.
    async fn send_json(&self, body: &ChatRequest) -> SparkResult<RawResponse> {
        let response = self.post(body, false).await?;

        let value: serde_json::Value = response.json().await.map_err(|e| {
            error!(provider = PROVIDER_NAME, error = ?e, "Failed to parse response");
            ProviderError::new(ProviderErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        // OpenRouter reports some upstream failures as 200 with an error body.
        if let Some(err) = error_from_body(&value) {
            warn!(provider = PROVIDER_NAME, error = %err, "Error body in success response");
            return Err(err);
        }

        Ok(RawResponse::new(value))
    }
}

#[async_trait]
impl ContentProvider for OpenRouterClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, messages), fields(provider = PROVIDER_NAME, message_count = messages.len()))]
    async fn send_chat(&self, model: &str, messages: &[ChatMessage]) -> SparkResult<RawResponse> {
        let request = ChatRequest::builder()
            .model(model)
            .messages(messages.to_vec())
            .build()
            .map_err(|e| invalid_request(format!("Failed to build request: {}", e)))?;

        debug!(model, "Sending chat request");
        let response = self.send_json(&request).await?;
        debug!(model, "Received chat response");
        Ok(response)
    }

    #[instrument(skip(self, messages), fields(provider = PROVIDER_NAME, message_count = messages.len()))]
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: StreamOptions,
    ) -> SparkResult<ChatStream> {
        let request = ChatRequest::builder()
            .model(model)
            .messages(messages.to_vec())
            .stream(true)
            .stream_options(options.include_usage.then_some(options))
            .build()
            .map_err(|e| invalid_request(format!("Failed to build request: {}", e)))?;

        let response = match self.post(&request, true).await {
            Ok(response) => response,
            Err(e) if e.as_provider().and_then(ProviderError::status) == Some(429) => {
                error!(provider = PROVIDER_NAME, "Stream request rate limited");
                return Err(ProviderError::new(ProviderErrorKind::Api {
                    status: 429,
                    message: "OpenRouter rate limited (429). Consider retrying later.".to_string(),
                    retry_after: e.as_provider().and_then(|p| p.kind.retry_after()),
                })
                .into());
            }
            Err(e) => return Err(e),
        };

        debug!(model, "Stream opened");
        Ok(decode_stream(response))
    }

    #[instrument(skip(self, prompt), fields(provider = PROVIDER_NAME, model = %self.config.image_model()))]
    async fn generate_image(&self, prompt: &str) -> SparkResult<Vec<String>> {
        let request = ChatRequest::builder()
            .model(self.config.image_model().as_str())
            .messages(vec![ChatMessage::user(prompt)])
            .modalities(Some(vec!["image".to_string(), "text".to_string()]))
            .build()
            .map_err(|e| invalid_request(format!("Failed to build request: {}", e)))?;

        let response = self.send_json(&request).await?;
        let decoded: ImageResponse = serde_json::from_value(response.into_value())
            .map_err(|e| JsonError::new(format!("Failed to decode image response: {}", e)))?;

        let urls = decoded.urls();
        debug!(count = urls.len(), "Received generated images");
        Ok(urls)
    }
}

/// Turns an event-stream response into stream chunks.
fn decode_stream(response: Response) -> ChatStream {
    let stream = async_stream::try_stream! {
        let mut bytes = response.bytes_stream();
        let mut decoder = SseDecoder::default();

        'read: while let Some(chunk) = bytes.next().await {
            let chunk = chunk.map_err(|e| stream_error(format!("Failed to read stream: {}", e)))?;
            for event in decoder.push(&chunk) {
                match event {
                    SseEvent::Done => break 'read,
                    SseEvent::Data(payload) => yield parse_event(&payload)?,
                }
            }
        }

        if let Some(SseEvent::Data(payload)) = decoder.finish() {
            yield parse_event(&payload)?;
        }
    };

    Box::pin(stream)
}

fn parse_event(payload: &str) -> SparkResult<StreamChunk> {
    let event: StreamEvent = serde_json::from_str(payload)
        .map_err(|e| JsonError::new(format!("Failed to decode stream chunk: {}", e)))?;

    if let Some(err) = &event.error {
        let message = err
            .message
            .clone()
            .unwrap_or_else(|| "stream terminated by provider".to_string());
        return Err(stream_error(message));
    }

    Ok(StreamChunk::from(event))
}

/// Delay in seconds from a `Retry-After` header. HTTP-date values are ignored.
fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Maps a decoded body without `choices` but with an `error` object to an API
/// error. The status comes from `error.code`, or 502 when it has none.
#[track_caller]
fn error_from_body(value: &serde_json::Value) -> Option<SparkError> {
    if value.get("choices").is_some() {
        return None;
    }
    let envelope = serde_json::from_value::<ErrorEnvelope>(value.clone()).ok()?;
    let status = envelope.error.status().unwrap_or(502);
    let message = envelope
        .error
        .message
        .unwrap_or_else(|| value.to_string());
    Some(
        ProviderError::new(ProviderErrorKind::Api {
            status,
            message,
            retry_after: None,
        })
        .into(),
    )
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
}

#[track_caller]
fn invalid_request(message: impl Into<String>) -> SparkError {
    ProviderError::new(ProviderErrorKind::InvalidRequest(message.into())).into()
}

#[track_caller]
fn stream_error(message: impl Into<String>) -> SparkError {
    ProviderError::new(ProviderErrorKind::Stream(message.into())).into()
}

#[track_caller]
fn transport_error(e: &reqwest::Error) -> SparkError {
    ProviderError::new(ProviderErrorKind::Transport {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    })
    .into()
}
