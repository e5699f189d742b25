//! Request validation error types.

/// Validation failure on an inbound request field.
///
/// Validation errors are raised before any job row is created, so they never
/// leave partial state behind.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// Human-readable description of the violated constraint
    pub message: String,
    /// Dotted path of the offending request field, when known
    pub field: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError without a field path.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            field: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a new ValidationError attributed to a specific request field.
    ///
    /// # Examples
    ///
    /// ```
    /// use maquette_error::ValidationError;
    ///
    /// let err = ValidationError::for_field("scene_count must be between 2 and 8", "scene_count");
    /// assert_eq!(err.field.as_deref(), Some("scene_count"));
    /// ```
    #[track_caller]
    pub fn for_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            field: Some(field.into()),
            line: location.line(),
            file: location.file(),
        }
    }
}
