//! Cancel command implementation.

use anyhow::Result;
use console::style;

use hqs_hal::Job;

use super::common::Connection;

/// Execute the cancel command.
pub async fn execute(conn: &Connection, job_id: &str) -> Result<()> {
    let mut job = conn.job(job_id).await?;
    job.cancel().await?;

    println!(
        "{} Cancellation requested for job {}",
        style("✓").green().bold(),
        style(job_id).cyan()
    );
    println!("  Use 'hqs job {job_id}' to confirm it was cancelled.");
    Ok(())
}
