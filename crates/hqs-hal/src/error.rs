//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Authentication error (missing or unresolvable credentials).
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The requested entity could not be found or its description could not
    /// be interpreted.
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// The remote service answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Job execution failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Job was cancelled.
    #[error("Job cancelled")]
    JobCancelled,

    /// Operation is not valid in the job's current state.
    #[error("Invalid job state: {0}")]
    InvalidState(String),

    /// Timeout waiting for job.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl HalError {
    /// HTTP status carried by the error, if it came from an API response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HalError::Api { status, .. } => Some(*status),
            HalError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
