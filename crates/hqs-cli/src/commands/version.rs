//! Version command implementation.

use console::style;

use hqs_adapter_honeywell::config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Honeywell Quantum Solutions API client",
        style("hqs").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  hqs-hal                 Backend and job abstractions");
    println!("  hqs-adapter-honeywell   REST client for the Honeywell API");
    println!("  hqs-cli                 Command-line interface");
    println!();
    println!(
        "Default API: {}/{}",
        style(DEFAULT_BASE_URL).underlined(),
        DEFAULT_API_VERSION
    );
    println!("License:     {}", style("Apache-2.0").dim());
}
