//! The structured request a user submits for generation.

use crate::{ContentFormat, Length, Platform, Tone};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single generation attempt.
///
/// Fields are private: once built, a request is not changed. Build a new one
/// for every attempt.
///
/// # Examples
///
/// ```
/// use sparkcaption_core::{ContentFormat, GenerationRequest, Platform, Tone};
///
/// let request = GenerationRequest::builder()
///     .prompt("coffee in Paris")
///     .platform(Platform::Instagram)
///     .tone(Tone::Casual)
///     .format(ContentFormat::Caption)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt(), "coffee in Paris");
/// assert_eq!(*request.platform(), Platform::Instagram);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GenerationRequest {
    /// What the content is about
    prompt: String,
    /// Target platform
    #[builder(default)]
    platform: Platform,
    /// Voice of the copy
    #[builder(default)]
    tone: Tone,
    /// Desired caption length
    #[builder(default)]
    length: Length,
    /// Caption only, image post or video
    #[builder(default)]
    format: ContentFormat,
}

impl GenerationRequest {
    /// Returns a builder for constructing a GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }
}

impl GenerationRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.prompt {
            Some(prompt) if prompt.trim().is_empty() => Err("prompt must not be empty".to_string()),
            _ => Ok(()),
        }
    }
}
