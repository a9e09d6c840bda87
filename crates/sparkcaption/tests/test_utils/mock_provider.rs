//! Scripted [`ContentProvider`] for exercising the generator offline.

use async_trait::async_trait;
use serde_json::{Value, json};
use sparkcaption::{
    ChatMessage, ChatStream, ContentProvider, RawResponse, SparkError, SparkResult, StreamChunk,
    StreamOptions,
};
use sparkcaption_error::{ProviderError, ProviderErrorKind};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Replays queued results in order and records what it was asked.
#[derive(Default)]
pub struct MockProvider {
    chat: Mutex<VecDeque<SparkResult<RawResponse>>>,
    image: Mutex<Option<SparkResult<Vec<String>>>>,
    stream: Mutex<Vec<SparkResult<StreamChunk>>>,
    chat_calls: AtomicU32,
    image_calls: AtomicU32,
    last_model: Mutex<Option<String>>,
    last_messages: Mutex<Vec<ChatMessage>>,
    last_stream_options: Mutex<Option<StreamOptions>>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one chat result.
    pub fn with_chat(self, result: SparkResult<RawResponse>) -> Self {
        self.chat.lock().unwrap().push_back(result);
        self
    }

    /// Queue a successful chat response carrying `body`.
    pub fn with_chat_json(self, body: Value) -> Self {
        self.with_chat(Ok(RawResponse::new(body)))
    }

    /// Result returned by every image call.
    pub fn with_image(self, result: SparkResult<Vec<String>>) -> Self {
        *self.image.lock().unwrap() = Some(result);
        self
    }

    /// Items yielded by the next stream.
    pub fn with_stream(self, items: Vec<SparkResult<StreamChunk>>) -> Self {
        *self.stream.lock().unwrap() = items;
        self
    }

    pub fn chat_calls(&self) -> u32 {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> u32 {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn last_model(&self) -> Option<String> {
        self.last_model.lock().unwrap().clone()
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }

    pub fn last_stream_options(&self) -> Option<StreamOptions> {
        *self.last_stream_options.lock().unwrap()
    }

    fn record(&self, model: &str, messages: &[ChatMessage]) {
        *self.last_model.lock().unwrap() = Some(model.to_string());
        *self.last_messages.lock().unwrap() = messages.to_vec();
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn send_chat(&self, model: &str, messages: &[ChatMessage]) -> SparkResult<RawResponse> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.record(model, messages);
        self.chat
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(api_error(500, "mock chat script exhausted")))
    }

    async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: StreamOptions,
    ) -> SparkResult<ChatStream> {
        self.record(model, messages);
        *self.last_stream_options.lock().unwrap() = Some(options);
        let items = std::mem::take(&mut *self.stream.lock().unwrap());
        Ok(Box::pin(futures::stream::iter(items)))
    }

    async fn generate_image(&self, _prompt: &str) -> SparkResult<Vec<String>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.image
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// An API error with the given status.
pub fn api_error(status: u16, message: &str) -> SparkError {
    ProviderError::new(ProviderErrorKind::Api {
        status,
        message: message.to_string(),
        retry_after: None,
    })
    .into()
}

/// A 429 without a retry-after hint.
#[allow(dead_code)]
pub fn rate_limited() -> SparkError {
    api_error(429, "Rate limit exceeded")
}

/// A chat-completion body whose message content is `content`.
#[allow(dead_code)]
pub fn chat_response(content: &str) -> Value {
    json!({
        "id": "gen-mock",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
