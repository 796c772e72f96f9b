//! Auth command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use console::style;

use super::common::Connection;

/// Execute the auth command.
///
/// Resolves the API key the same way every other command does and checks it
/// with one lightweight request.
pub async fn execute(conn: &Connection) -> Result<()> {
    let client = conn.client().await?;
    let machines = client
        .list_backends()
        .await
        .context("API key was not accepted")?;

    println!(
        "{} Authenticated against {}",
        style("✓").green().bold(),
        style(client.api().session().service_url()).cyan()
    );
    println!("  Machines visible: {}", machines.len());
    println!(
        "  Checked at:       {}",
        style(Local::now().format("%Y-%m-%d %H:%M:%S")).dim()
    );
    Ok(())
}
