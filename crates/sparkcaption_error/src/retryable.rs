//! Rate-limit classification shared by every error that can reach the retry loop.

use std::time::Duration;

/// Errors that the retry policy knows how to inspect.
///
/// Only rate limiting (HTTP 429) is considered transient. The structured
/// status wins; the message is scanned for `"429"` only when no status is
/// available at all.
///
/// # Examples
///
/// ```
/// use sparkcaption_error::{ProviderError, ProviderErrorKind, RetryableError};
///
/// let limited = ProviderError::new(ProviderErrorKind::Api {
///     status: 429,
///     message: "slow down".to_string(),
///     retry_after: Some(3),
/// });
/// assert!(limited.is_rate_limited());
/// assert_eq!(limited.retry_after(), Some(std::time::Duration::from_secs(3)));
///
/// let bad_request = ProviderError::new(ProviderErrorKind::Api {
///     status: 400,
///     message: "request id 4291".to_string(),
///     retry_after: None,
/// });
/// assert!(!bad_request.is_rate_limited());
/// ```
pub trait RetryableError: std::fmt::Display + Sized {
    /// Structured HTTP status, if the transport exposed one.
    fn status_code(&self) -> Option<u16>;

    /// Provider-supplied wait before the next attempt.
    fn retry_after(&self) -> Option<Duration> {
        None
    }

    /// The error message, without source location or attempt annotations.
    fn message(&self) -> String;

    /// Attach the number of attempts made before giving up.
    fn with_attempts(self, _attempts: u32) -> Self {
        self
    }

    /// Returns true when this error signals rate limiting.
    fn is_rate_limited(&self) -> bool {
        match self.status_code() {
            Some(status) => status == 429,
            None => self.message().contains("429"),
        }
    }
}

impl RetryableError for crate::ProviderError {
    fn status_code(&self) -> Option<u16> {
        self.status()
    }

    fn retry_after(&self) -> Option<Duration> {
        self.kind.retry_after().map(Duration::from_secs)
    }

    fn message(&self) -> String {
        self.kind.to_string()
    }

    fn with_attempts(self, attempts: u32) -> Self {
        crate::ProviderError::with_attempts(self, attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProviderError, ProviderErrorKind};

    #[test]
    fn test_location_is_not_scanned_for_status() {
        let mut err = ProviderError::new(ProviderErrorKind::Stream("connection reset".to_string()));
        err.line = 429;
        assert!(err.to_string().contains("429"));
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_message_is_scanned_without_status() {
        let err = ProviderError::new(ProviderErrorKind::Stream("upstream returned 429".to_string()));
        assert!(err.is_rate_limited());
    }
}
