//! Submit command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;

use hqs_hal::{Backend, Job, Qobj};

use super::common::{Connection, load_program, print_results, spinner};

/// Execute the submit command.
pub async fn execute(
    conn: &Connection,
    input: &str,
    machine: &str,
    shots: u32,
    name: Option<&str>,
    wait: bool,
    timeout: u64,
) -> Result<()> {
    if shots == 0 {
        anyhow::bail!("Shot count must be at least 1");
    }

    let program = load_program(input)?;
    let mut qobj = Qobj::new(program, shots);
    if let Some(name) = name {
        qobj = qobj.with_name(name);
    }

    let backend = conn.backend(machine).await?;

    println!(
        "{} Submitting {} to {} ({} shots)",
        style("→").cyan().bold(),
        style(input).dim(),
        style(machine).bold(),
        shots
    );

    let mut job = backend.run(qobj).await?;
    let job_id = job
        .job_id()
        .map(ToString::to_string)
        .unwrap_or_default();

    println!("{} Job ID: {}", style("✓").green().bold(), style(&job_id).cyan());

    if !wait {
        println!("  Use 'hqs wait {job_id}' to follow it.");
        return Ok(());
    }

    let progress = spinner("Waiting for job to complete...")?;
    let result = job
        .wait_for_final_state(Duration::from_secs(timeout), Duration::from_secs(5))
        .await;
    progress.finish_and_clear();

    print_results(&result?);
    Ok(())
}
