//! Test utilities for SparkCaption tests.
//!
//! This module provides a scripted provider and request helpers.

pub mod mock_provider;

#[allow(unused_imports)]
pub use mock_provider::{MockProvider, api_error, chat_response, rate_limited};

use sparkcaption::{ContentFormat, GenerationRequest, Platform, Tone};

/// Helper to create a test GenerationRequest using the builder pattern.
#[allow(dead_code)]
pub fn create_test_request(prompt: &str, format: ContentFormat) -> GenerationRequest {
    GenerationRequest::builder()
        .prompt(prompt)
        .platform(Platform::Instagram)
        .tone(Tone::Casual)
        .format(format)
        .build()
        .expect("Failed to build test request")
}
