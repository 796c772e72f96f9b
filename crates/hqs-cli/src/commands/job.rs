//! Job command implementation.

use anyhow::Result;
use console::style;

use hqs_hal::{Job, JobStatus};

use super::common::{Connection, print_results};

/// Execute the job command.
pub async fn execute(conn: &Connection, job_id: &str, format: &str) -> Result<()> {
    if !matches!(format, "table" | "json") {
        anyhow::bail!("Unknown format '{format}'. Use 'table' or 'json'.");
    }

    let mut job = conn.job(job_id).await?;
    let status = job.status().await?;

    if format == "json" {
        let value = match job.last_response() {
            Some(resp) => serde_json::to_value(resp)?,
            None => serde_json::Value::Null,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let styled = match &status {
        JobStatus::Completed => style(status.name()).green(),
        JobStatus::Failed(_) | JobStatus::Cancelled => style(status.name()).red(),
        _ => style(status.name()).yellow(),
    };

    println!("{} {}", style("Job").bold(), style(job_id).cyan());
    println!("  Status: {styled}");

    if let Some(resp) = job.last_response() {
        if let Some(name) = &resp.name {
            println!("  Name:   {name}");
        }
        if let Some(pos) = resp.queue_position {
            println!("  Queue position: {pos}");
        }
    }

    match status {
        JobStatus::Completed => print_results(&job.result().await?),
        JobStatus::Failed(msg) if !msg.is_empty() => {
            println!("  Error:  {}", style(msg).red());
        }
        _ => {}
    }

    Ok(())
}
