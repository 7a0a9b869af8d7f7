//! Tests for render, config, completions and man.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_render() {
    match parse(&["assetver", "render", "page.json"]) {
        CliCommand::Render { path } => assert_eq!(path, std::path::Path::new("page.json")),
        _ => panic!("expected Render"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["assetver", "config"]) {
        CliCommand::Config { path } => assert!(!path),
        _ => panic!("expected Config"),
    }
    match parse(&["assetver", "config", "--path"]) {
        CliCommand::Config { path } => assert!(path),
        _ => panic!("expected Config --path"),
    }
}

#[test]
fn cli_parse_global_config_flag() {
    let cli = Cli::try_parse_from(["assetver", "render", "page.json", "--config", "/tmp/a.toml"])
        .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/a.toml")));

    let cli = Cli::try_parse_from(["assetver", "--config", "/tmp/b.toml", "config"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/b.toml")));
}

#[test]
fn cli_parse_completions() {
    match parse(&["assetver", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
    assert!(Cli::try_parse_from(["assetver", "completions", "cmd"]).is_err());
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["assetver", "man"]), CliCommand::Man));
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
