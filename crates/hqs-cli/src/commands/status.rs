//! Status command implementation.

use anyhow::Result;
use console::style;

use hqs_hal::Backend;

use super::common::Connection;

/// Execute the status command.
pub async fn execute(conn: &Connection, machine: &str) -> Result<()> {
    let backend = conn.backend(machine).await?;
    let status = backend.status().await?;

    let state = if status.operational {
        style("operational").green()
    } else {
        style("offline").red()
    };

    println!("{} {}", style(backend.name()).cyan().bold(), state);
    println!("  Pending jobs: {}", status.pending_jobs);
    if let Some(msg) = &status.status_msg {
        println!("  Message:      {msg}");
    }

    Ok(())
}
