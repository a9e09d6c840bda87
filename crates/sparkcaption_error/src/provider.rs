//! Provider (hosted LLM API) error types.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// The request never produced an HTTP response, or the body could not be read.
    #[display("Request failed: {message}")]
    Transport {
        /// HTTP status, when the transport knows one
        status: Option<u16>,
        /// Error message
        message: String,
    },
    /// The provider answered with a non-success status.
    #[display("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
        /// Value of the `retry-after` header, in seconds
        retry_after: Option<u64>,
    },
    /// A streaming response was interrupted or malformed.
    #[display("Stream error: {_0}")]
    Stream(String),
    /// The response body could not be decoded.
    #[display("Response parsing failed: {_0}")]
    ResponseParsing(String),
    /// The request was rejected before it was sent.
    #[display("Invalid request: {_0}")]
    InvalidRequest(String),
    /// Image generation failed.
    #[display("{_0}")]
    ImageGeneration(String),
}

impl ProviderErrorKind {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderErrorKind::Transport { status, .. } => *status,
            ProviderErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider-supplied `retry-after` hint, in seconds.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ProviderErrorKind::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use sparkcaption_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Api {
///     status: 429,
///     message: "Too Many Requests".to_string(),
///     retry_after: None,
/// });
/// assert_eq!(err.status(), Some(429));
/// assert!(err.to_string().contains("status 429"));
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Number of attempts made before giving up, when retried
    pub attempts: Option<u32>,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            attempts: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        self.kind.status()
    }

    /// Record how many attempts were made before this error was surfaced.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Provider Error: {}", self.kind)?;
        if let Some(attempts) = self.attempts {
            write!(f, " (after {} attempt", attempts)?;
            if attempts != 1 {
                write!(f, "s")?;
            }
            write!(f, ")")?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
