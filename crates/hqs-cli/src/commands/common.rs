//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use hqs_adapter_honeywell::{
    ClientConfig, HoneywellBackend, HoneywellClient, HoneywellJob, HoneywellProvider,
    default_token_provider,
};
use hqs_hal::{ExecutionResult, JobId};

/// Label used for jobs looked up by id alone; the service does not report
/// the machine a job ran on.
const UNKNOWN_MACHINE: &str = "honeywell";

/// Connection settings from the global flags.
#[derive(Debug, Clone)]
pub struct Connection {
    url: Option<String>,
    token: Option<String>,
}

impl Connection {
    pub fn new(url: Option<String>, token: Option<String>) -> Self {
        Self { url, token }
    }

    /// Build a client and make sure it carries a token.
    ///
    /// `--token`/`HQS_API_KEY` is used when given, otherwise the key is
    /// prompted for.
    pub async fn client(&self) -> Result<Arc<HoneywellClient>> {
        let mut config = ClientConfig::default();
        if let Some(url) = &self.url {
            config = config.with_base_url(url);
        }

        let client = HoneywellClient::with_config(config, Arc::new(default_token_provider()))
            .context("Failed to create Honeywell client")?;
        client
            .authenticate(self.token.clone())
            .await
            .context("No API key available")?;
        Ok(Arc::new(client))
    }

    pub async fn provider(&self) -> Result<HoneywellProvider> {
        Ok(HoneywellProvider::from_shared(self.client().await?))
    }

    pub async fn backend(&self, machine: &str) -> Result<HoneywellBackend> {
        Ok(self.provider().await?.get_backend(machine))
    }

    /// Handle for an existing job.
    pub async fn job(&self, job_id: &str) -> Result<HoneywellJob> {
        Ok(HoneywellJob::from_id(
            UNKNOWN_MACHINE,
            self.client().await?,
            JobId::new(job_id),
        ))
    }
}

/// Read a program file.
pub fn load_program(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    if source.trim().is_empty() {
        anyhow::bail!("Program file is empty: {path}");
    }
    Ok(source)
}

/// Steadily ticking spinner with a message.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Print execution results in a table format (shared by submit, job, wait).
pub fn print_results(result: &ExecutionResult) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}
