//! Orchestration pipeline error types.

/// Specific error conditions for pipeline orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Ledger bookkeeping failure (e.g. unknown job or asset id)
    #[display("Ledger error: {}", _0)]
    Ledger(String),
    /// A storyboard frame could not be generated
    #[display("Scene {index} failed: {message}")]
    SceneFrameFailed {
        /// 1-based scene index
        index: usize,
        /// Underlying failure description
        message: String,
    },
}

/// Error type for orchestration operations.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
