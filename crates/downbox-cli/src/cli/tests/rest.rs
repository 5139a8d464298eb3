//! Tests for the remaining subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_serve() {
    assert!(matches!(parse(&["downbox", "serve"]), CliCommand::Serve));
}

#[test]
fn cli_parse_list() {
    assert!(matches!(parse(&["downbox", "list"]), CliCommand::List));
}

#[test]
fn cli_parse_resolve() {
    match parse(&["downbox", "resolve", "content://downloads/3"]) {
        CliCommand::Resolve { identifier } => {
            assert_eq!(identifier, "content://downloads/3");
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_verify() {
    match parse(&["downbox", "verify", "content://downloads/3"]) {
        CliCommand::Verify { identifier } => {
            assert_eq!(identifier, "content://downloads/3");
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["downbox", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_missing_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["downbox"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["downbox", "frobnicate"]).is_err());
}
