//! HQS Hardware Abstraction Layer
//!
//! This crate defines the interface a quantum hardware provider exposes to
//! callers, independent of any particular vendor API.
//!
//! # Overview
//!
//! - A [`Backend`] trait: `name`, `run`, `status`, `retrieve_job`
//! - A [`Job`] trait for handles on remote computations, with the
//!   [`JobStatus`] state machine
//! - [`Qobj`] submission payloads and [`ExecutionResult`] / [`Counts`]
//! - Pluggable credential resolution via [`TokenProvider`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use std::time::Duration;
//! use hqs_hal::{Backend, Job, Qobj};
//!
//! let qobj = Qobj::new(std::fs::read_to_string("bell.qasm")?, 100);
//! let mut job = backend.run(qobj).await?;
//! println!("Job submitted: {}", job.job_id().unwrap());
//!
//! let result = job
//!     .wait_for_final_state(Duration::from_secs(600), Duration::from_secs(5))
//!     .await?;
//! if let Some((bitstring, count)) = result.counts.most_frequent() {
//!     println!("Most frequent: {} ({} times)", bitstring, count);
//! }
//! ```

pub mod auth;
pub mod backend;
pub mod error;
pub mod job;
pub mod qobj;
pub mod result;

pub use auth::{ChainTokenProvider, EnvTokenProvider, PromptTokenProvider, TokenProvider};
pub use backend::{Backend, BackendConfig, BackendFactory, BackendStatus};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use qobj::{Qobj, QobjConfig};
pub use result::{Counts, ExecutionResult};
