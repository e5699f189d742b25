//! Image provider error types.

/// Specific error conditions for image generation backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// HTTP transport failure before a response was received
    #[display("Request failed: {}", _0)]
    Http(String),
    /// The backend answered with a non-success status
    #[display("API error {status}: {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body or error description
        message: String,
    },
    /// The backend answered successfully but carried no image payload
    #[display("No image data returned")]
    MissingImageData,
    /// The response body could not be interpreted
    #[display("Invalid provider response: {}", _0)]
    InvalidResponse(String),
    /// The request body could not be encoded
    #[display("Request encoding failed: {}", _0)]
    Encoding(String),
    /// Request signature derivation failed
    #[display("Request signing failed: {}", _0)]
    Signing(String),
    /// Credentials are missing or inconsistent
    #[display("Credential configuration: {}", _0)]
    Credential(String),
}

/// Error type for image generation backend operations.
///
/// # Examples
///
/// ```
/// use maquette_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::MissingImageData);
/// assert!(format!("{}", err).contains("No image data returned"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The specific error condition
    pub kind: ProviderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
