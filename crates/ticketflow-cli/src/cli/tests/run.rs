//! Tests for run and validate subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_run() {
    match parse(&["ticketflow", "run", "https://acme.atlassian.net/browse/PROJ-1"]) {
        CliCommand::Run {
            url,
            seed,
            auto_retry,
        } => {
            assert_eq!(url, "https://acme.atlassian.net/browse/PROJ-1");
            assert!(seed.is_none());
            assert!(!auto_retry);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_seed_and_auto_retry() {
    match parse(&["ticketflow", "run", "https://x/browse/A-1", "--seed", "42", "--auto-retry"]) {
        CliCommand::Run {
            seed, auto_retry, ..
        } => {
            assert_eq!(seed, Some(42));
            assert!(auto_retry);
        }
        _ => panic!("expected Run with --seed and --auto-retry"),
    }
}

#[test]
fn cli_parse_run_requires_url() {
    assert!(Cli::try_parse_from(["ticketflow", "run"]).is_err());
}

#[test]
fn cli_parse_validate() {
    match parse(&["ticketflow", "validate", "https://x/browse/A-1"]) {
        CliCommand::Validate { url } => assert_eq!(url, "https://x/browse/A-1"),
        _ => panic!("expected Validate"),
    }
}
