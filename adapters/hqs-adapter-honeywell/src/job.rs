//! Honeywell job handle.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use hqs_hal::{Counts, ExecutionResult, HalResult, Job, JobId, JobStatus, Qobj};

use crate::api::JobStatusResponse;
use crate::client::HoneywellClient;
use crate::error::{HoneywellError, HoneywellResult};

/// One computation on a Honeywell machine.
///
/// Created either from a payload (state `Created`, to be submitted) or from
/// an existing remote id (state `Submitted`, nothing sent). The handle talks
/// to the service only when asked to.
pub struct HoneywellJob {
    backend: String,
    client: Arc<HoneywellClient>,
    job_id: Option<JobId>,
    qobj: Option<Qobj>,
    status: JobStatus,
    last_response: Option<JobStatusResponse>,
    submitted_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for HoneywellJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoneywellJob")
            .field("backend", &self.backend)
            .field("job_id", &self.job_id)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl HoneywellJob {
    /// New, unsubmitted job for `qobj`.
    pub fn new(backend: impl Into<String>, client: Arc<HoneywellClient>, qobj: Qobj) -> Self {
        Self {
            backend: backend.into(),
            client,
            job_id: None,
            qobj: Some(qobj),
            status: JobStatus::Created,
            last_response: None,
            submitted_at: None,
            finished_at: None,
        }
    }

    /// Handle bound to a job that already exists on the service.
    pub fn from_id(backend: impl Into<String>, client: Arc<HoneywellClient>, job_id: JobId) -> Self {
        Self {
            backend: backend.into(),
            client,
            job_id: Some(job_id),
            qobj: None,
            status: JobStatus::Submitted,
            last_response: None,
            submitted_at: None,
            finished_at: None,
        }
    }

    /// Payload this job was created with, if it was created locally.
    pub fn qobj(&self) -> Option<&Qobj> {
        self.qobj.as_ref()
    }

    /// Last status response received from the service.
    pub fn last_response(&self) -> Option<&JobStatusResponse> {
        self.last_response.as_ref()
    }

    /// Time the service accepted the job (local submissions only).
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Time a terminal state was first observed.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    fn require_id(&self) -> HoneywellResult<&JobId> {
        self.job_id.as_ref().ok_or(HoneywellError::NotSubmitted)
    }

    fn record(&mut self, response: JobStatusResponse) {
        let status = response.job_status();
        if status != self.status {
            debug!("Job {} moved {} -> {}", response.job, self.status, status);
        }
        if status.is_terminal() && self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
        self.status = status;
        self.last_response = Some(response);
    }

    async fn refresh(&mut self) -> HoneywellResult<()> {
        let id = self.require_id()?.clone();
        let response = self.client.job_status(id.as_str()).await?;
        self.record(response);
        Ok(())
    }

    async fn submit_inner(&mut self) -> HoneywellResult<JobId> {
        if let Some(id) = &self.job_id {
            return Err(HoneywellError::AlreadySubmitted(id.to_string()));
        }
        let qobj = self.qobj.as_ref().ok_or(HoneywellError::NotSubmitted)?;

        let mut config = qobj.config.clone();
        if let Some(name) = &qobj.name {
            config
                .options
                .entry("name")
                .or_insert_with(|| serde_json::Value::String(name.clone()));
        }

        let response = self
            .client
            .job_submit(&self.backend, &config, &qobj.program)
            .await?;

        let job_id = JobId::new(response.id());
        info!("Job submitted to {}: {}", self.backend, job_id);

        self.job_id = Some(job_id.clone());
        self.submitted_at = Some(Utc::now());
        self.status = JobStatus::Submitted;
        self.last_response = Some(response);
        Ok(job_id)
    }

    async fn status_inner(&mut self) -> HoneywellResult<JobStatus> {
        if self.job_id.is_none() || self.status.is_terminal() {
            return Ok(self.status.clone());
        }
        self.refresh().await?;
        Ok(self.status.clone())
    }

    async fn result_inner(&mut self) -> HoneywellResult<ExecutionResult> {
        let id = self.require_id()?.to_string();

        // Failed and Cancelled are final; only a Completed job missing its
        // results, or a job still in flight, is worth asking about again.
        let needs_refresh = match (&self.status, &self.last_response) {
            (JobStatus::Completed, resp) => resp.as_ref().is_none_or(|r| r.results.is_none()),
            (status, _) => !status.is_terminal(),
        };
        if needs_refresh {
            self.refresh().await?;
        }

        match &self.status {
            JobStatus::Completed => {}
            JobStatus::Failed(msg) => return Err(HoneywellError::JobFailed(msg.clone())),
            other => {
                return Err(HoneywellError::NotCompleted {
                    id,
                    status: other.to_string(),
                });
            }
        }

        let results = self
            .last_response
            .as_ref()
            .and_then(|r| r.results.as_ref())
            .ok_or_else(|| {
                HoneywellError::JobFailed("Completed job returned no measurement results".into())
            })?;

        let counts = parse_results(results);
        let shots = u32::try_from(counts.total_shots()).unwrap_or(u32::MAX);
        let raw = serde_json::to_value(results)?;
        Ok(ExecutionResult::new(counts, shots).with_raw(raw))
    }

    async fn cancel_inner(&mut self) -> HoneywellResult<()> {
        let id = self.require_id()?.clone();
        self.client.job_cancel(id.as_str()).await?;
        info!("Job cancel requested: {}", id);
        Ok(())
    }
}

/// Convert per-register shot lists into a bitstring histogram.
///
/// Register names are sorted and each shot's register values concatenated
/// in that order.
pub fn parse_results(results: &HashMap<String, Vec<String>>) -> Counts {
    let mut reg_names: Vec<&String> = results.keys().collect();
    reg_names.sort();

    let n_shots = results.values().map(Vec::len).max().unwrap_or(0);

    (0..n_shots)
        .map(|shot| {
            reg_names
                .iter()
                .filter_map(|reg| results[*reg].get(shot))
                .map(String::as_str)
                .collect::<String>()
        })
        .collect()
}

#[async_trait]
impl Job for HoneywellJob {
    fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    fn backend_name(&self) -> &str {
        &self.backend
    }

    fn current_status(&self) -> &JobStatus {
        &self.status
    }

    #[instrument(skip(self))]
    async fn submit(&mut self) -> HalResult<JobId> {
        Ok(self.submit_inner().await?)
    }

    #[instrument(skip(self))]
    async fn status(&mut self) -> HalResult<JobStatus> {
        Ok(self.status_inner().await?)
    }

    #[instrument(skip(self))]
    async fn result(&mut self) -> HalResult<ExecutionResult> {
        Ok(self.result_inner().await?)
    }

    #[instrument(skip(self))]
    async fn cancel(&mut self) -> HalResult<()> {
        Ok(self.cancel_inner().await?)
    }
}
