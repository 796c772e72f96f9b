//! Job lifecycle types.
//!
//! The job state machine:
//!
//! ```text
//!   new ──→ Created ──submit()──→ Submitted ──→ Queued ──→ Running ──→ Completed
//!                                     │           │           │
//!                                     │           │           ├──→ Failed(reason)
//!                                     │           │           │
//!                                     └───────────┴───────────┴──→ Cancelled
//! ```
//!
//! **Invariants:**
//! - A job starts in `Created` and moves to `Submitted` once the service
//!   assigns it an id.
//! - Every later transition is driven by the state the service reports.
//! - Terminal states (`Completed`, `Failed`, `Cancelled`) are permanent.
//! - `result()` is only valid when status is `Completed`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Unique identifier for a job, assigned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job exists locally but has not been sent to the service.
    Created,
    /// Job was accepted by the service and has an id.
    Submitted,
    /// Job is waiting in queue.
    Queued,
    /// Job is currently running.
    Running,
    /// Job completed successfully.
    Completed,
    /// Job failed with an error message.
    Failed(String),
    /// Job was cancelled.
    Cancelled,
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed(_) | JobStatus::Cancelled
        )
    }

    /// Check if the job is known to the service but not finished.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            JobStatus::Submitted | JobStatus::Queued | JobStatus::Running
        )
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }

    /// Short state name without the failure message.
    pub fn name(&self) -> &'static str {
        match self {
            JobStatus::Created => "Created",
            JobStatus::Submitted => "Submitted",
            JobStatus::Queued => "Queued",
            JobStatus::Running => "Running",
            JobStatus::Completed => "Completed",
            JobStatus::Failed(_) => "Failed",
            JobStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Failed(msg) => write!(f, "Failed: {msg}"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Trait for a handle on one remote computation.
///
/// A job is created by [`Backend::run`](crate::Backend::run) (already
/// submitted) or [`Backend::retrieve_job`](crate::Backend::retrieve_job)
/// (bound to an existing id, no I/O). The caller owns the handle and drives
/// it by polling.
#[async_trait]
pub trait Job: Send + Sync {
    /// Remote id, `None` until the job has been submitted.
    fn job_id(&self) -> Option<&JobId>;

    /// Name of the backend the job belongs to.
    fn backend_name(&self) -> &str;

    /// Last known status, without contacting the service.
    fn current_status(&self) -> &JobStatus;

    /// Send the job to the service. Valid only in `Created`.
    async fn submit(&mut self) -> HalResult<JobId>;

    /// Refresh and return the status reported by the service.
    async fn status(&mut self) -> HalResult<JobStatus>;

    /// Fetch the result of a completed job.
    async fn result(&mut self) -> HalResult<ExecutionResult>;

    /// Ask the service to cancel the job.
    async fn cancel(&mut self) -> HalResult<()>;

    /// Poll until the job reaches a terminal state, then return its result.
    async fn wait_for_final_state(
        &mut self,
        timeout: Duration,
        poll_interval: Duration,
    ) -> HalResult<ExecutionResult> {
        use tokio::time::{Instant, sleep};

        let deadline = Instant::now() + timeout;

        loop {
            match self.status().await? {
                JobStatus::Completed => return self.result().await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Created => {
                    return Err(HalError::InvalidState(
                        "job has not been submitted".into(),
                    ));
                }
                JobStatus::Submitted | JobStatus::Queued | JobStatus::Running => {}
            }

            if Instant::now() >= deadline {
                let id = self.job_id().map(ToString::to_string).unwrap_or_default();
                return Err(HalError::Timeout(id));
            }
            sleep(poll_interval).await;
        }
    }
}
