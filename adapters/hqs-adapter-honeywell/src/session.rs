//! Authenticated, retrying HTTP session.
//!
//! Every request goes through [`Session::send`], which attaches the current
//! access token as a bearer credential and retries transient failures with
//! exponential backoff. POST requests are only retried when no connection
//! was made. Non-transient error statuses are returned on the first attempt.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::{HoneywellError, HoneywellResult};

/// Shared holder for the API access token.
///
/// Clones share the same slot, so a token set through one clone is seen by
/// every session holding another.
#[derive(Clone, Default)]
pub struct AccessToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl AccessToken {
    /// Holder with an optional initial token. Empty strings count as unset.
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token.filter(|t| !t.is_empty()))),
        }
    }

    /// Current token.
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the token. An empty string clears it.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = if token.is_empty() { None } else { Some(token) };
    }

    /// Remove the token.
    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a token is set.
    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = if self.is_set() { "[REDACTED]" } else { "None" };
        f.debug_tuple("AccessToken").field(&shown).finish()
    }
}

/// HTTP session bound to one service URL and one access token.
pub struct Session {
    /// HTTP client with timeouts configured.
    client: Client,
    /// Versioned service URL.
    service_url: Url,
    /// Bearer token attached to every request.
    token: AccessToken,
    /// Retry behaviour for transient failures.
    retry: RetryPolicy,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("service_url", &self.service_url())
            .field("token", &self.token)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Session {
    /// Create a session from configuration and a token holder.
    pub fn new(config: &ClientConfig, token: AccessToken) -> HoneywellResult<Self> {
        let raw = config.service_url();
        let service_url =
            Url::parse(&raw).map_err(|e| HoneywellError::InvalidUrl(format!("{raw}: {e}")))?;
        if service_url.cannot_be_a_base() {
            return Err(HoneywellError::InvalidUrl(raw));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(HoneywellError::Http)?;

        Ok(Self {
            client,
            service_url,
            token,
            retry: config.retry.clone(),
        })
    }

    /// Versioned service URL, without trailing slash.
    pub fn service_url(&self) -> &str {
        self.service_url.as_str().trim_end_matches('/')
    }

    /// The token holder used by this session.
    pub fn access_token(&self) -> &AccessToken {
        &self.token
    }

    /// Service URL extended by `segments`, each percent-encoded as a single
    /// path segment. A trailing `""` yields a trailing slash.
    fn url(&self, segments: &[&str]) -> HoneywellResult<Url> {
        let mut url = self.service_url.clone();
        url.path_segments_mut()
            .map_err(|()| HoneywellError::InvalidUrl(self.service_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET the resource at `segments` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> HoneywellResult<T> {
        let resp = self.send(Method::GET, segments, None).await?;
        Self::decode(resp).await
    }

    /// POST a JSON body to `segments` and decode the JSON response.
    pub async fn post<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &impl Serialize,
    ) -> HoneywellResult<T> {
        let body = serde_json::to_value(body)?;
        let resp = self.send(Method::POST, segments, Some(&body)).await?;
        Self::decode(resp).await
    }

    /// POST with no body, ignoring the response content.
    pub async fn post_empty(&self, segments: &[&str]) -> HoneywellResult<()> {
        self.send(Method::POST, segments, None).await?;
        Ok(())
    }

    /// Send one logical request, retrying transient failures.
    ///
    /// Returns the first 2xx response. POST is not idempotent, so it is only
    /// retried when the connection could not be established. Non-transient
    /// error statuses, and transient ones once retries are exhausted, become
    /// [`HoneywellError::ApiError`] carrying the response body.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&serde_json::Value>,
    ) -> HoneywellResult<Response> {
        let url = self.url(segments)?;
        let idempotent = method != Method::POST;
        let mut attempt = 0u32;

        loop {
            debug!("{} {} (attempt {})", method, url, attempt + 1);

            let mut req = self.client.request(method.clone(), url.clone());
            if let Some(token) = self.token.get() {
                req = req.bearer_auth(token);
            }
            if let Some(body) = body {
                req = req.json(body);
            }

            match req.send().await {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) => {
                    let status = resp.status();
                    if idempotent && is_transient_status(status) && attempt < self.retry.max_retries
                    {
                        let delay = retry_after(resp.headers())
                            .filter(|_| status == StatusCode::TOO_MANY_REQUESTS)
                            .map_or_else(
                                || self.retry.backoff(attempt),
                                |d| d.min(self.retry.max_backoff),
                            );
                        warn!(
                            "{} {} returned {}, retry {}/{} in {:?}",
                            method,
                            url,
                            status,
                            attempt + 1,
                            self.retry.max_retries,
                            delay
                        );
                        attempt += 1;
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    let message = resp.text().await.unwrap_or_default();
                    return Err(HoneywellError::ApiError {
                        status: status.as_u16(),
                        message,
                    });
                }
                Err(e) => {
                    if is_retryable_error(&e, idempotent) && attempt < self.retry.max_retries {
                        let delay = self.retry.backoff(attempt);
                        warn!(
                            "{} {} failed ({}), retry {}/{} in {:?}",
                            method,
                            url,
                            e,
                            attempt + 1,
                            self.retry.max_retries,
                            delay
                        );
                        attempt += 1;
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(HoneywellError::Http(e));
                }
            }
        }
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> HoneywellResult<T> {
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// A refused connection sent nothing and is always safe to retry; a timeout
/// may have reached the server, so only idempotent requests retry on it.
fn is_retryable_error(e: &reqwest::Error, idempotent: bool) -> bool {
    e.is_connect() || (idempotent && e.is_timeout())
}

/// `Retry-After` given in seconds.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
