//! Backend trait and configuration.
//!
//! The [`Backend`] trait is the capability interface a provider exposes to
//! callers:
//!
//! ```text
//!   name() ──→ status() ──→ run(qobj) ──→ Job::status() ──→ Job::result()
//!   (sync)      (async)      (async)        (async)           (async)
//! ```
//!
//! ## Method table
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `run()` | async | yes | `HalResult<Self::Job>` |
//! | `status()` | async | yes | `HalResult<BackendStatus>` |
//! | `retrieve_job()` | sync | yes | `Self::Job` |
//! | `retrieve_jobs()` | sync | provided | `Vec<Self::Job>` |

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HalResult;
use crate::job::{Job, JobId};
use crate::qobj::Qobj;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// API endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Operational status of a backend.
///
/// Remote services report status as a loosely typed mapping; this is the
/// fixed shape it must deserialize into. Unknown fields are ignored,
/// `status_msg` may be missing or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    /// Whether the backend accepts jobs.
    pub operational: bool,
    /// Number of jobs waiting on the backend.
    pub pending_jobs: u32,
    /// Free-form status message.
    #[serde(default)]
    pub status_msg: Option<String>,
}

impl BackendStatus {
    /// Validate a raw status mapping against the fixed schema.
    pub fn from_map(
        map: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(map))
    }
}

/// Trait for quantum backends.
///
/// # Contract
///
/// - `name()` never performs I/O.
/// - `run()` creates a job, submits it (one network call) and returns the
///   handle without waiting for completion.
/// - `retrieve_job()` binds a handle to an existing remote id without I/O.
/// - `status()` fetches the current status and validates it into
///   [`BackendStatus`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Job handle type produced by this backend.
    type Job: Job;

    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Submit a payload and return the handle of the new job.
    async fn run(&self, qobj: Qobj) -> HalResult<Self::Job>;

    /// Fetch the current backend status.
    async fn status(&self) -> HalResult<BackendStatus>;

    /// Handle for an already submitted job.
    fn retrieve_job(&self, job_id: &JobId) -> Self::Job;

    /// Handles for several already submitted jobs, in the order given.
    fn retrieve_jobs(&self, job_ids: &[JobId]) -> Vec<Self::Job> {
        job_ids.iter().map(|id| self.retrieve_job(id)).collect()
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
