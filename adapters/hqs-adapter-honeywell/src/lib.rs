//! Honeywell Quantum Solutions provider
//!
//! This crate connects the HQS hardware abstraction layer to the Honeywell
//! quantum cloud REST API (`https://hqsapi.honeywell.com/v1`).
//!
//! # Layers
//!
//! | Type | Role |
//! |------|------|
//! | [`Session`] | Bearer token + retrying HTTP |
//! | [`Api`] | REST binding: machines and jobs |
//! | [`HoneywellClient`] | Token management and the public calls |
//! | [`HoneywellBackend`] | [`hqs_hal::Backend`] implementation |
//! | [`HoneywellJob`] | [`hqs_hal::Job`] implementation |
//! | [`HoneywellProvider`] | Hands out backends sharing one client |
//!
//! # Authentication
//!
//! Set the `HQS_API_KEY` environment variable:
//!
//! ```bash
//! export HQS_API_KEY="your-api-key"
//! ```
//!
//! Without it, [`HoneywellClient::authenticate`] asks for the key on the
//! console (`API Key:`). The prompt is pluggable; see
//! [`HoneywellClient::with_config`].
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use hqs_adapter_honeywell::{HoneywellClient, HoneywellProvider};
//! use hqs_hal::{Backend, Job, Qobj};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HoneywellClient::new()?;
//!     client.authenticate(None).await?;
//!
//!     let provider = HoneywellProvider::new(client);
//!     let backend = provider.get_backend("HQS-LT-S1-APIVAL");
//!
//!     let qasm = std::fs::read_to_string("bell.qasm")?;
//!     let mut job = backend.run(Qobj::new(qasm, 100)).await?;
//!     let result = job
//!         .wait_for_final_state(Duration::from_secs(600), Duration::from_secs(5))
//!         .await?;
//!     println!("Results: {:?}", result.counts);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
mod backend;
mod client;
pub mod config;
mod error;
mod job;
mod provider;
pub mod session;

pub use api::{Api, JobStatusResponse, StatusMap};
pub use backend::HoneywellBackend;
pub use client::{HoneywellClient, default_token_provider};
pub use config::{ClientConfig, RetryPolicy};
pub use error::{HoneywellError, HoneywellResult};
pub use job::{HoneywellJob, parse_results};
pub use provider::HoneywellProvider;
pub use session::{AccessToken, Session};

// Re-export common types for convenience.
pub use hqs_hal::{Backend, BackendConfig, BackendFactory, BackendStatus, Job, JobId, JobStatus};
