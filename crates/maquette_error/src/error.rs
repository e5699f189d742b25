//! Top-level error wrapper types.

use crate::{ConfigError, DatabaseError, PipelineError, ProviderError, ValidationError};

/// This is the foundation error enum. Every Maquette crate converts its
/// errors into one of these variants at the workspace boundary.
///
/// # Examples
///
/// ```
/// use maquette_error::{MaquetteError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: MaquetteError = config_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MaquetteErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Request validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Image generation backend error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Ledger persistence error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Orchestration pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Maquette error with kind discrimination.
///
/// # Examples
///
/// ```
/// use maquette_error::{MaquetteResult, ValidationError};
///
/// fn might_fail() -> MaquetteResult<()> {
///     Err(ValidationError::for_field("script too short", "script"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Maquette Error: {}", _0)]
pub struct MaquetteError(Box<MaquetteErrorKind>);

impl MaquetteError {
    /// Create a new error from a kind.
    pub fn new(kind: MaquetteErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MaquetteErrorKind {
        &self.0
    }

    /// Whether this error is a request validation failure.
    ///
    /// Validation failures surface as client errors; everything else is a
    /// server-side failure.
    pub fn is_validation(&self) -> bool {
        matches!(*self.0, MaquetteErrorKind::Validation(_))
    }
}

// Generic From implementation for any type that converts to MaquetteErrorKind
impl<T> From<T> for MaquetteError
where
    T: Into<MaquetteErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Maquette operations.
///
/// # Examples
///
/// ```
/// use maquette_error::{MaquetteResult, ConfigError};
///
/// fn load() -> MaquetteResult<String> {
///     Err(ConfigError::new("VOLC_REGION not set"))?
/// }
/// ```
pub type MaquetteResult<T> = std::result::Result<T, MaquetteError>;
