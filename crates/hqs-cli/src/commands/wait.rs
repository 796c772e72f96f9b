//! Wait command implementation.
//!
//! Poll a job until it reaches a terminal state, then print results.

use std::time::Duration;

use anyhow::Result;
use console::style;

use hqs_hal::{HalError, Job};

use super::common::{Connection, print_results, spinner};

/// Execute the wait command.
pub async fn execute(conn: &Connection, job_id: &str, timeout: u64, interval: u64) -> Result<()> {
    let mut job = conn.job(job_id).await?;

    println!(
        "{} Waiting for job {} (timeout: {}s)",
        style("→").cyan().bold(),
        style(job_id).dim(),
        timeout
    );

    let progress = spinner("Waiting for job to complete...")?;
    let outcome = job
        .wait_for_final_state(
            Duration::from_secs(timeout),
            Duration::from_secs(interval.max(1)),
        )
        .await;
    progress.finish_and_clear();

    match outcome {
        Ok(result) => print_results(&result),
        Err(HalError::JobFailed(msg)) => {
            println!(
                "{} Job finished with status: {}",
                style("✗").red().bold(),
                style(format!("Failed: {msg}")).red()
            );
        }
        Err(HalError::JobCancelled) => {
            println!(
                "{} Job finished with status: {}",
                style("✗").red().bold(),
                style("Cancelled").red()
            );
        }
        Err(HalError::Timeout(_)) => {
            anyhow::bail!(
                "Timeout after {}s. Job {} is still {}. Use 'hqs job {}' to check later.",
                timeout,
                job_id,
                job.current_status().name(),
                job_id
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
