//! CLI argument parsing tests.
//!
//! The binary's argument definitions live in `src/cli.rs`, which only
//! depends on clap, so they are compiled straight into this test.

#[path = "../src/cli.rs"]
#[allow(dead_code)]
mod cli;

use clap::Parser;
use cli::{Cli, Commands};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn test_parse_backends() {
    let cli = parse(&["hqs", "backends"]).unwrap();
    assert!(matches!(cli.command, Commands::Backends));
}

#[test]
fn test_parse_status_requires_machine() {
    let cli = parse(&["hqs", "status", "HQS-LT-S1"]).unwrap();
    match cli.command {
        Commands::Status { machine } => assert_eq!(machine, "HQS-LT-S1"),
        other => panic!("expected Status, got {other:?}"),
    }

    assert!(parse(&["hqs", "status"]).is_err());
}

#[test]
fn test_parse_submit_defaults() {
    let cli = parse(&["hqs", "submit", "-i", "bell.qasm", "-m", "HQS-LT-S1"]).unwrap();
    match cli.command {
        Commands::Submit {
            input,
            machine,
            shots,
            name,
            wait,
            timeout,
        } => {
            assert_eq!(input, "bell.qasm");
            assert_eq!(machine, "HQS-LT-S1");
            assert_eq!(shots, 100);
            assert!(name.is_none());
            assert!(!wait);
            assert_eq!(timeout, 3600);
        }
        other => panic!("expected Submit, got {other:?}"),
    }
}

#[test]
fn test_parse_submit_all_args() {
    let cli = parse(&[
        "hqs",
        "submit",
        "--input",
        "ghz.qasm",
        "--machine",
        "HQS-LT-S1-SIM",
        "--shots",
        "500",
        "--name",
        "ghz-run",
        "--wait",
        "--timeout",
        "60",
    ])
    .unwrap();
    match cli.command {
        Commands::Submit {
            shots,
            name,
            wait,
            timeout,
            ..
        } => {
            assert_eq!(shots, 500);
            assert_eq!(name.as_deref(), Some("ghz-run"));
            assert!(wait);
            assert_eq!(timeout, 60);
        }
        other => panic!("expected Submit, got {other:?}"),
    }
}

#[test]
fn test_parse_submit_missing_machine() {
    assert!(parse(&["hqs", "submit", "-i", "bell.qasm"]).is_err());
}

#[test]
fn test_parse_submit_invalid_shots() {
    assert!(parse(&["hqs", "submit", "-i", "a", "-m", "b", "-s", "many"]).is_err());
}

#[test]
fn test_parse_job_default_format() {
    let cli = parse(&["hqs", "job", "abc-123"]).unwrap();
    match cli.command {
        Commands::Job { job_id, format } => {
            assert_eq!(job_id, "abc-123");
            assert_eq!(format, "table");
        }
        other => panic!("expected Job, got {other:?}"),
    }
}

#[test]
fn test_parse_job_json_format() {
    let cli = parse(&["hqs", "job", "abc-123", "-f", "json"]).unwrap();
    assert!(matches!(cli.command, Commands::Job { format, .. } if format == "json"));
}

#[test]
fn test_parse_wait() {
    let cli = parse(&["hqs", "wait", "abc", "-t", "30", "--interval", "2"]).unwrap();
    match cli.command {
        Commands::Wait {
            job_id,
            timeout,
            interval,
        } => {
            assert_eq!(job_id, "abc");
            assert_eq!(timeout, 30);
            assert_eq!(interval, 2);
        }
        other => panic!("expected Wait, got {other:?}"),
    }
}

#[test]
fn test_parse_cancel() {
    let cli = parse(&["hqs", "cancel", "abc"]).unwrap();
    assert!(matches!(cli.command, Commands::Cancel { job_id } if job_id == "abc"));
    assert!(parse(&["hqs", "cancel"]).is_err());
}

#[test]
fn test_parse_global_url_and_token() {
    let cli = parse(&[
        "hqs",
        "backends",
        "--url",
        "http://localhost:8080",
        "--token",
        "secret",
    ])
    .unwrap();
    assert_eq!(cli.url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(cli.token.as_deref(), Some("secret"));
}

#[test]
fn test_parse_auth_and_version() {
    assert!(matches!(parse(&["hqs", "auth"]).unwrap().command, Commands::Auth));
    assert!(matches!(
        parse(&["hqs", "version"]).unwrap().command,
        Commands::Version
    ));
}

#[test]
fn test_parse_verbose_levels() {
    assert_eq!(parse(&["hqs", "version"]).unwrap().verbose, 0);
    assert_eq!(parse(&["hqs", "-v", "version"]).unwrap().verbose, 1);
    assert_eq!(parse(&["hqs", "-vvv", "backends"]).unwrap().verbose, 3);
}

#[test]
fn test_no_subcommand() {
    assert!(parse(&["hqs"]).is_err());
}

#[test]
fn test_unknown_subcommand() {
    assert!(parse(&["hqs", "compile"]).is_err());
}
