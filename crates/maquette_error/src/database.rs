//! Database error types.

/// Specific error conditions for ledger persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// Failed to establish or use a database connection
    #[display("Connection error: {}", _0)]
    Connection(String),
    /// A query failed to execute
    #[display("Query error: {}", _0)]
    Query(String),
    /// A row expected to exist was not found
    #[display("Not found: {}", _0)]
    NotFound(String),
}

/// Error type for database operations.
///
/// # Examples
///
/// ```
/// use maquette_error::{DatabaseError, DatabaseErrorKind};
///
/// let err = DatabaseError::new(DatabaseErrorKind::NotFound("job 42".to_string()));
/// assert!(format!("{}", err).contains("job 42"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// The specific error condition
    pub kind: DatabaseErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl DatabaseError {
    /// Create a new DatabaseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
