//! Tests for login and catalog flags, and the list/labels subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_credentials() {
    let cli = parse(&["dripdl", "--email", "ada@example.com", "--password", "pw"]);
    assert_eq!(cli.account.email.as_deref(), Some("ada@example.com"));
    assert_eq!(cli.account.password.as_deref(), Some("pw"));
}

#[test]
fn cli_parse_label() {
    let cli = parse(&["dripdl", "--label", "cool-label"]);
    assert_eq!(cli.account.label.as_deref(), Some("cool-label"));
    assert!(!cli.account.paginated);
}

#[test]
fn cli_rejects_label_with_paginated() {
    assert!(Cli::try_parse_from(["dripdl", "--label", "x", "--paginated"]).is_err());
}

#[test]
fn cli_parse_list_with_global_flags_after() {
    let cli = parse(&["dripdl", "list", "--paginated", "--email", "a@b.c"]);
    assert!(matches!(cli.command, Some(CliCommand::List)));
    assert!(cli.account.paginated);
    assert_eq!(cli.account.email.as_deref(), Some("a@b.c"));
}

#[test]
fn cli_parse_labels() {
    let cli = parse(&["dripdl", "labels"]);
    assert!(matches!(cli.command, Some(CliCommand::Labels)));
}
