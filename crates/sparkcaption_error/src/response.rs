//! Errors raised while normalizing provider responses.

/// The provider answered, but no text could be extracted from the response.
///
/// # Examples
///
/// ```
/// use sparkcaption_error::EmptyResponseError;
///
/// let err = EmptyResponseError::new();
/// assert!(err.to_string().contains("No text generated."));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("No text generated. (at line {} in {})", line, file)]
pub struct EmptyResponseError {
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl EmptyResponseError {
    /// Create a new EmptyResponseError at the current location.
    #[track_caller]
    pub fn new() -> Self {
        let location = std::panic::Location::caller();
        Self {
            line: location.line(),
            file: location.file(),
        }
    }
}

impl Default for EmptyResponseError {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}
