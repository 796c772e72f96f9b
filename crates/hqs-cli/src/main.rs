//! hqs command-line interface.
//!
//! ```text
//! hqs backends
//! hqs status HQS-LT-S1
//! hqs submit -i bell.qasm -m HQS-LT-S1 -s 500 --wait
//! hqs job <id> --format json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::common::Connection;
use commands::{auth, backends, cancel, job, status, submit, version, wait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let conn = Connection::new(cli.url, cli.token);

    let result = match cli.command {
        Commands::Backends => backends::execute(&conn).await,

        Commands::Status { machine } => status::execute(&conn, &machine).await,

        Commands::Submit {
            input,
            machine,
            shots,
            name,
            wait: do_wait,
            timeout,
        } => {
            submit::execute(
                &conn,
                &input,
                &machine,
                shots,
                name.as_deref(),
                do_wait,
                timeout,
            )
            .await
        }

        Commands::Job { job_id, format } => job::execute(&conn, &job_id, &format).await,

        Commands::Wait {
            job_id,
            timeout,
            interval,
        } => wait::execute(&conn, &job_id, timeout, interval).await,

        Commands::Cancel { job_id } => cancel::execute(&conn, &job_id).await,

        Commands::Auth => auth::execute(&conn).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
