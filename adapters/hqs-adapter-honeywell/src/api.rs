//! Honeywell REST API binding.
//!
//! Thin resource-oriented wrapper over [`Session`]:
//!
//! | Call | HTTP |
//! |------|------|
//! | [`Api::backends`] | `GET machine/` |
//! | [`Api::backend`]`.status()` | `GET machine/{name}` |
//! | [`Api::submit_job`] | `POST job` |
//! | [`Api::job`]`.status()` | `GET job/{id}` |
//! | [`Api::job`]`.cancel()` | `POST job/{id}/cancel` |
//!
//! Names and ids are percent-encoded as single path segments.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use hqs_hal::{JobStatus, QobjConfig};

use crate::error::HoneywellResult;
use crate::session::Session;

/// Loosely typed status mapping as returned by the service.
pub type StatusMap = serde_json::Map<String, serde_json::Value>;

/// Program language sent with every submission.
pub const QASM_LANGUAGE: &str = "OPENQASM 2.0";

/// REST binding for the Honeywell API.
#[derive(Debug)]
pub struct Api {
    session: Session,
}

impl Api {
    /// Wrap a session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// List all machines with their status.
    #[instrument(skip(self))]
    pub async fn backends(&self) -> HoneywellResult<Vec<StatusMap>> {
        debug!("Listing Honeywell machines");
        self.session.get(&["machine", ""]).await
    }

    /// Resource handle for one machine.
    pub fn backend<'a>(&'a self, name: &'a str) -> BackendResource<'a> {
        BackendResource { api: self, name }
    }

    /// Submit a program to `machine`.
    #[instrument(skip(self, config, program))]
    pub async fn submit_job(
        &self,
        machine: &str,
        config: &QobjConfig,
        program: &str,
    ) -> HoneywellResult<JobStatusResponse> {
        let req = JobRequest::new(machine, config, program);
        debug!("Submitting job {} to machine {}", req.name, machine);
        self.session.post(&["job"], &req).await
    }

    /// Resource handle for one job.
    pub fn job<'a>(&'a self, id: &'a str) -> JobResource<'a> {
        JobResource { api: self, id }
    }
}

/// `machine/{name}` resource.
#[derive(Debug, Clone, Copy)]
pub struct BackendResource<'a> {
    api: &'a Api,
    name: &'a str,
}

impl BackendResource<'_> {
    /// Current machine status.
    #[instrument(skip(self), fields(machine = self.name))]
    pub async fn status(&self) -> HoneywellResult<StatusMap> {
        debug!("Getting machine status for {}", self.name);
        self.api.session.get(&["machine", self.name]).await
    }
}

/// `job/{id}` resource.
#[derive(Debug, Clone, Copy)]
pub struct JobResource<'a> {
    api: &'a Api,
    id: &'a str,
}

impl JobResource<'_> {
    /// Current job status, with results once completed.
    #[instrument(skip(self), fields(job = self.id))]
    pub async fn status(&self) -> HoneywellResult<JobStatusResponse> {
        debug!("Getting job status for {}", self.id);
        self.api.session.get(&["job", self.id]).await
    }

    /// Cancel a queued or running job.
    #[instrument(skip(self), fields(job = self.id))]
    pub async fn cancel(&self) -> HoneywellResult<()> {
        debug!("Cancelling job {}", self.id);
        self.api.session.post_empty(&["job", self.id, "cancel"]).await
    }
}

// ---------------------------------------------------------------------------
// Request / response serde types
// ---------------------------------------------------------------------------

/// Request body for `POST /job`.
#[derive(Debug, Serialize)]
pub struct JobRequest {
    /// Human-readable job name.
    pub name: String,
    /// Target machine.
    pub machine: String,
    /// Circuit language, always [`QASM_LANGUAGE`].
    pub language: String,
    /// Circuit program.
    pub program: String,
    /// Number of shots.
    pub count: u32,
    /// Execution options, passed through untouched.
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl JobRequest {
    /// Build a request from an execution configuration.
    ///
    /// A `name` option, if present, becomes the job name instead of an
    /// option.
    pub fn new(machine: impl Into<String>, config: &QobjConfig, program: impl Into<String>) -> Self {
        let mut options = config.options.clone();
        let name = match options.remove("name") {
            Some(serde_json::Value::String(name)) => name,
            _ => format!("job-{}", uuid::Uuid::new_v4()),
        };

        Self {
            name,
            machine: machine.into(),
            language: QASM_LANGUAGE.into(),
            program: program.into(),
            count: config.shots,
            options,
        }
    }
}

/// Job status as returned by `POST /job` and `GET /job/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobStatusResponse {
    /// Job identifier.
    pub job: String,
    /// Job name.
    #[serde(default)]
    pub name: Option<String>,
    /// Server state: `queued`, `running`, `completed`, `failed`,
    /// `canceling`, `canceled`, ...
    pub status: String,
    /// Per-register shot values, populated when completed.
    ///
    /// Keys are classical register names; values hold one bitstring per
    /// shot, in shot order.
    #[serde(default)]
    pub results: Option<HashMap<String, Vec<String>>>,
    /// Error detail if `status == "failed"`; either a string or an object
    /// with a `text` field.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    /// Queue position (present while queued).
    #[serde(rename = "queue-position", default)]
    pub queue_position: Option<u32>,
}

impl JobStatusResponse {
    /// The job id.
    pub fn id(&self) -> &str {
        &self.job
    }

    /// Human-readable error message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| match e {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(obj) => obj
                .get("text")
                .and_then(|t| t.as_str())
                .map_or_else(|| e.to_string(), str::to_string),
            other => other.to_string(),
        })
    }

    /// Map the server state onto [`JobStatus`].
    ///
    /// `"canceling"` counts as still running. Unrecognised states are
    /// reported as `Submitted` so callers keep polling.
    pub fn job_status(&self) -> JobStatus {
        match self.status.to_lowercase().as_str() {
            "queued" | "pending" => JobStatus::Queued,
            "submitted" => JobStatus::Submitted,
            "running" | "canceling" | "cancelling" => JobStatus::Running,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed(self.error_message().unwrap_or_default()),
            "canceled" | "cancelled" => JobStatus::Cancelled,
            other => {
                tracing::warn!("Unrecognised job state '{}' for job {}", other, self.job);
                JobStatus::Submitted
            }
        }
    }
}
