//! Command-line surface.
//!
//! Kept free of runtime dependencies so the integration tests can parse
//! arguments against the real definitions.

use clap::{Parser, Subcommand};

/// hqs - submit and track jobs on Honeywell quantum machines
#[derive(Debug, Parser)]
#[command(name = "hqs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// API host, without version path
    #[arg(long, env = "HQS_API_URL", global = true)]
    pub url: Option<String>,

    /// API key (prompted for when absent)
    #[arg(long, env = "HQS_API_KEY", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List machines and their status
    Backends,

    /// Show the status of one machine
    Status {
        /// Machine name, e.g. HQS-LT-S1
        machine: String,
    },

    /// Submit an OpenQASM 2.0 program
    Submit {
        /// Program file
        #[arg(short, long)]
        input: String,

        /// Target machine
        #[arg(short, long)]
        machine: String,

        /// Number of shots
        #[arg(short, long, default_value = "100")]
        shots: u32,

        /// Job name (generated when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Wait for the job to finish and print its results
        #[arg(short, long)]
        wait: bool,

        /// Timeout in seconds when waiting
        #[arg(short, long, default_value = "3600")]
        timeout: u64,
    },

    /// Show a job's status and, once completed, its results
    Job {
        /// Job ID
        job_id: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Wait for a job to finish
    Wait {
        /// Job ID
        job_id: String,

        /// Timeout in seconds
        #[arg(short, long, default_value = "3600")]
        timeout: u64,

        /// Seconds between status checks
        #[arg(long, default_value = "5")]
        interval: u64,
    },

    /// Cancel a queued or running job
    Cancel {
        /// Job ID
        job_id: String,
    },

    /// Resolve the API key and check it against the service
    Auth,

    /// Show version information
    Version,
}
