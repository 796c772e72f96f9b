//! Backends command implementation.

use anyhow::Result;
use console::style;

use hqs_hal::Backend;

use super::common::Connection;

/// Execute the backends command.
pub async fn execute(conn: &Connection) -> Result<()> {
    let provider = conn.provider().await?;
    let backends = provider.backends().await?;

    if backends.is_empty() {
        println!("{} No machines reported.", style("!").yellow().bold());
        return Ok(());
    }

    println!("{} Available machines:\n", style("HQS").cyan().bold());

    for backend in &backends {
        match backend.status().await {
            Ok(status) => {
                println!(
                    "  {} {}",
                    if status.operational {
                        style("●").green()
                    } else {
                        style("○").red()
                    },
                    style(backend.name()).bold()
                );
                println!("    Pending jobs: {}", status.pending_jobs);
                if let Some(msg) = &status.status_msg {
                    println!("    Status: {msg}");
                }
            }
            Err(e) => {
                println!("  {} {}", style("?").yellow(), style(backend.name()).bold());
                println!("    {}", style(e).dim());
            }
        }
    }
    println!();

    Ok(())
}
