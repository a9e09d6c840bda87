//! Error types for the SparkCaption library.
//!
//! Every error records the source location where it was created. All of them
//! fold into [`SparkError`], which is what the public API returns.

mod config;
mod json;
mod provider;
mod response;
mod retryable;

pub use config::ConfigError;
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind};
pub use response::EmptyResponseError;
pub use retryable::RetryableError;

use std::time::Duration;

/// Crate-level error variants.
#[derive(Debug, Clone, derive_more::From, derive_more::Display)]
pub enum SparkErrorKind {
    /// Missing API key or unreadable configuration
    #[display("{_0}")]
    Config(ConfigError),
    /// Transport or API failure from the provider
    #[display("{_0}")]
    Provider(ProviderError),
    /// The provider returned no extractable text
    #[display("{_0}")]
    EmptyResponse(EmptyResponseError),
    /// JSON serialization/deserialization error
    #[display("{_0}")]
    Json(JsonError),
}

/// SparkCaption error with kind discrimination.
#[derive(Debug, Clone, derive_more::Display)]
#[display("SparkCaption Error: {}", _0)]
pub struct SparkError(Box<SparkErrorKind>);

impl SparkError {
    /// Create a new error from a kind.
    pub fn new(kind: SparkErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SparkErrorKind {
        &self.0
    }

    /// Returns the provider error, if this is one.
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self.kind() {
            SparkErrorKind::Provider(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for SparkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            SparkErrorKind::Config(e) => Some(e),
            SparkErrorKind::Provider(e) => Some(e),
            SparkErrorKind::EmptyResponse(e) => Some(e),
            SparkErrorKind::Json(e) => Some(e),
        }
    }
}

// Generic From implementation for any type that converts to SparkErrorKind
impl<T> From<T> for SparkError
where
    T: Into<SparkErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for SparkError {
    fn status_code(&self) -> Option<u16> {
        self.as_provider().and_then(ProviderError::status)
    }

    fn retry_after(&self) -> Option<Duration> {
        self.as_provider().and_then(RetryableError::retry_after)
    }

    fn message(&self) -> String {
        match self.kind() {
            SparkErrorKind::Config(e) => e.message.clone(),
            SparkErrorKind::Provider(e) => e.message(),
            SparkErrorKind::EmptyResponse(_) => "No text generated.".to_string(),
            SparkErrorKind::Json(e) => e.message.clone(),
        }
    }

    fn with_attempts(self, attempts: u32) -> Self {
        match *self.0 {
            SparkErrorKind::Provider(e) => Self::from(e.with_attempts(attempts)),
            other => Self::new(other),
        }
    }
}

/// Result type for SparkCaption operations.
pub type SparkResult<T> = std::result::Result<T, SparkError>;
