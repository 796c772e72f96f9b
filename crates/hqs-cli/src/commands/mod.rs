//! CLI command implementations.

pub mod auth;
pub mod backends;
pub mod cancel;
pub mod common;
pub mod job;
pub mod status;
pub mod submit;
pub mod version;
pub mod wait;
