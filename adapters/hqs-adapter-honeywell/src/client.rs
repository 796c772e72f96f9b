//! Client for programmatic access to the Honeywell API.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use hqs_hal::{ChainTokenProvider, EnvTokenProvider, PromptTokenProvider, QobjConfig, TokenProvider};

use crate::api::{Api, JobStatusResponse, StatusMap};
use crate::config::{API_KEY_ENV, API_KEY_PROMPT, ClientConfig};
use crate::error::{HoneywellError, HoneywellResult};
use crate::session::{AccessToken, Session};

/// Honeywell API client.
///
/// Owns the REST binding and decides where the access token comes from.
/// Errors raised by the REST layer are returned unchanged.
///
/// # Example
///
/// ```ignore
/// use hqs_adapter_honeywell::HoneywellClient;
///
/// let client = HoneywellClient::new()?;   // token from HQS_API_KEY, if set
/// if !client.has_token() {
///     client.authenticate(None).await?;   // HQS_API_KEY, else "API Key:" prompt
/// }
/// for machine in client.list_backends().await? {
///     println!("{:?}", machine.get("name"));
/// }
/// ```
pub struct HoneywellClient {
    api: Api,
    resolver: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for HoneywellClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoneywellClient")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

/// Default credential resolution: `HQS_API_KEY`, then a stdin prompt.
pub fn default_token_provider() -> ChainTokenProvider {
    ChainTokenProvider::new()
        .with(EnvTokenProvider::new(API_KEY_ENV))
        .with(PromptTokenProvider::stdin(API_KEY_PROMPT))
}

impl HoneywellClient {
    /// Client for the production API.
    ///
    /// The initial token is taken from `HQS_API_KEY` if it is set; no
    /// prompting happens here.
    pub fn new() -> HoneywellResult<Self> {
        let client = Self::with_config(ClientConfig::default(), Arc::new(default_token_provider()))?;
        if let Some(token) = EnvTokenProvider::new(API_KEY_ENV).lookup() {
            client.api.session().access_token().set(token);
        }
        Ok(client)
    }

    /// Client with explicit configuration and credential resolution.
    ///
    /// Starts without a token.
    pub fn with_config(
        config: ClientConfig,
        resolver: Arc<dyn TokenProvider>,
    ) -> HoneywellResult<Self> {
        let session = Session::new(&config, AccessToken::default())?;
        debug!("Honeywell client targeting {}", session.service_url());
        Ok(Self {
            api: Api::new(session),
            resolver,
        })
    }

    /// Set the initial token.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.api.session().access_token().set(token);
        self
    }

    /// The REST binding.
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Whether a token is currently set.
    pub fn has_token(&self) -> bool {
        self.api.session().access_token().is_set()
    }

    /// Set the access token.
    ///
    /// With `Some(token)` that token is used as is. With `None` (or an empty
    /// string) the token is resolved through the configured provider, which
    /// by default reads `HQS_API_KEY` and otherwise prompts for it.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: Option<String>) -> HoneywellResult<()> {
        let token = match token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => self
                .resolver
                .get_token()
                .await
                .map_err(|e| HoneywellError::Credentials(e.to_string()))?,
        };

        self.api.session().access_token().set(token);
        info!("Honeywell access token updated");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Backend-related calls
    // -----------------------------------------------------------------------

    /// Status mappings of all machines.
    pub async fn list_backends(&self) -> HoneywellResult<Vec<StatusMap>> {
        self.api.backends().await
    }

    /// Status mapping of one machine.
    pub async fn backend_status(&self, backend_name: &str) -> HoneywellResult<StatusMap> {
        self.api.backend(backend_name).status().await
    }

    // -----------------------------------------------------------------------
    // Job-related calls
    // -----------------------------------------------------------------------

    /// Submit `program` to `backend_name`; returns the new job's status,
    /// including its id.
    pub async fn job_submit(
        &self,
        backend_name: &str,
        config: &QobjConfig,
        program: &str,
    ) -> HoneywellResult<JobStatusResponse> {
        self.api.submit_job(backend_name, config, program).await
    }

    /// Status of an existing job.
    pub async fn job_status(&self, job_id: &str) -> HoneywellResult<JobStatusResponse> {
        self.api.job(job_id).status().await
    }

    /// Cancel an existing job.
    pub async fn job_cancel(&self, job_id: &str) -> HoneywellResult<()> {
        self.api.job(job_id).cancel().await
    }
}
