//! Honeywell backend implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use hqs_hal::{
    Backend, BackendConfig, BackendFactory, BackendStatus, HalError, HalResult, Job, JobId, Qobj,
    TokenProvider,
};

use crate::client::{HoneywellClient, default_token_provider};
use crate::config::ClientConfig;
use crate::error::{HoneywellError, HoneywellResult};
use crate::job::HoneywellJob;

/// A Honeywell machine, seen through a shared [`HoneywellClient`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use hqs_adapter_honeywell::{HoneywellBackend, HoneywellClient};
/// use hqs_hal::{Backend, Qobj};
///
/// let client = Arc::new(HoneywellClient::new()?);
/// let backend = HoneywellBackend::new("HQS-LT-S1-APIVAL", client);
///
/// println!("{:?}", backend.status().await?);
/// let job = backend.run(Qobj::new(qasm, 100)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HoneywellBackend {
    name: String,
    client: Arc<HoneywellClient>,
}

impl HoneywellBackend {
    /// Backend for machine `name`. No network access.
    pub fn new(name: impl Into<String>, client: Arc<HoneywellClient>) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }

    /// The shared client.
    pub fn client(&self) -> &Arc<HoneywellClient> {
        &self.client
    }

    /// Fetch and validate the machine status.
    ///
    /// A response that does not fit [`BackendStatus`] is reported as
    /// [`HoneywellError::Lookup`] with the validation message; every other
    /// error is passed through.
    pub async fn fetch_status(&self) -> HoneywellResult<BackendStatus> {
        let raw = self.client.backend_status(&self.name).await?;
        BackendStatus::from_map(raw)
            .map_err(|e| HoneywellError::Lookup(format!("Couldn't get backend status: {e}")))
    }
}

#[async_trait]
impl Backend for HoneywellBackend {
    type Job = HoneywellJob;

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, qobj))]
    async fn run(&self, qobj: Qobj) -> HalResult<HoneywellJob> {
        info!(
            "Running qobj {} on {} ({} shots)",
            qobj.qobj_id, self.name, qobj.config.shots
        );
        let mut job = HoneywellJob::new(&self.name, Arc::clone(&self.client), qobj);
        job.submit().await?;
        Ok(job)
    }

    #[instrument(skip(self))]
    async fn status(&self) -> HalResult<BackendStatus> {
        let status = self.fetch_status().await?;
        debug!(
            "{}: operational={}, pending_jobs={}",
            self.name, status.operational, status.pending_jobs
        );
        Ok(status)
    }

    fn retrieve_job(&self, job_id: &JobId) -> HoneywellJob {
        HoneywellJob::from_id(&self.name, Arc::clone(&self.client), job_id.clone())
    }
}

impl BackendFactory for HoneywellBackend {
    /// Build a backend with its own client.
    ///
    /// `endpoint` replaces the API host, `token` becomes the initial token
    /// and `extra["target"]` (falling back to `name`) names the machine.
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let target = config
            .extra
            .get("target")
            .and_then(|v| v.as_str())
            .unwrap_or(&config.name)
            .to_string();

        if target.is_empty() {
            return Err(HalError::Configuration("backend name is empty".into()));
        }

        let mut client_config = ClientConfig::default();
        if let Some(endpoint) = &config.endpoint {
            client_config = client_config.with_base_url(endpoint);
        }

        let resolver: Arc<dyn TokenProvider> = Arc::new(default_token_provider());
        let mut client = HoneywellClient::with_config(client_config, resolver)?;
        if let Some(token) = config.token {
            client = client.with_token(token);
        }

        Ok(Self::new(target, Arc::new(client)))
    }
}
