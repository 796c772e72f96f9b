//! Error types for the Honeywell adapter.

use thiserror::Error;

/// Result type for Honeywell operations.
pub type HoneywellResult<T> = Result<T, HoneywellError>;

/// Errors that can occur when interacting with the Honeywell API.
#[derive(Debug, Error)]
pub enum HoneywellError {
    /// HTTP request failed (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response (non-2xx status).
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Entity could not be found or its description could not be read.
    #[error("{0}")]
    Lookup(String),

    /// No token could be resolved.
    #[error("Credentials unavailable: {0}")]
    Credentials(String),

    /// Operation needs a job id but the job was never submitted.
    #[error("Job has not been submitted")]
    NotSubmitted,

    /// Job was already submitted.
    #[error("Job already submitted as {0}")]
    AlreadySubmitted(String),

    /// Job execution failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The configured service URL cannot carry request paths.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Job finished without being completed, or has not finished yet.
    #[error("Job {id} is not completed (status: {status})")]
    NotCompleted { id: String, status: String },
}

impl HoneywellError {
    /// HTTP status of an API error response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HoneywellError::ApiError { status, .. } => Some(*status),
            HoneywellError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the service answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

impl From<HoneywellError> for hqs_hal::HalError {
    fn from(e: HoneywellError) -> Self {
        match e {
            HoneywellError::Http(e) => hqs_hal::HalError::Network(e),
            HoneywellError::Json(e) => hqs_hal::HalError::Serialization(e),
            HoneywellError::ApiError { status, message } => {
                hqs_hal::HalError::Api { status, message }
            }
            HoneywellError::Lookup(msg) => hqs_hal::HalError::Lookup(msg),
            HoneywellError::Credentials(msg) => hqs_hal::HalError::Auth(msg),
            HoneywellError::JobFailed(msg) => hqs_hal::HalError::JobFailed(msg),
            HoneywellError::InvalidUrl(msg) => hqs_hal::HalError::Configuration(msg),
            e @ (HoneywellError::NotSubmitted
            | HoneywellError::AlreadySubmitted(_)
            | HoneywellError::NotCompleted { .. }) => {
                hqs_hal::HalError::InvalidState(e.to_string())
            }
        }
    }
}
