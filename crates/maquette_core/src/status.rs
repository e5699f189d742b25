//! Generation job lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a generation job.
///
/// A job is created in `Queued`, moves to `Running` once work begins, and
/// transitions exactly once to a terminal `Succeeded` or `Failed` state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Created, no work started yet
    #[display("queued")]
    Queued,
    /// Generation calls in flight
    #[display("running")]
    Running,
    /// All units generated and persisted
    #[display("succeeded")]
    Succeeded,
    /// Aborted with an error message
    #[display("failed")]
    Failed,
}

impl JobStatus {
    /// Convert to string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether this status ends the job lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "running" => Ok(JobStatus::Running),
            "succeeded" => Ok(JobStatus::Succeeded),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(format!("Unknown job status: {}", s)),
        }
    }
}
