//! Tests for command line parsing and config overrides

use crate::app::cli::args::*;
use crate::app::config::FileConfig;
use crate::app::error::AppError;
use crate::core::logging::LogFormat;
use crate::markers::api::DuplicatePolicy;
use clap::Parser;
use std::path::PathBuf;

static COMMAND_NAME: &str = "marker-replay";

fn parse(extra: &[&str]) -> Args {
    let mut argv = vec![COMMAND_NAME];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_scenario_is_required() {
    assert!(Args::try_parse_from([COMMAND_NAME]).is_err());

    let args = parse(&["steps.toml"]);
    assert_eq!(args.scenario, PathBuf::from("steps.toml"));
    assert!(args.config_file.is_none());
    assert!(!args.json);
}

#[test]
fn test_all_options() {
    let args = parse(&[
        "-c",
        "custom.toml",
        "-d",
        "replace",
        "-l",
        "debug",
        "-o",
        "ext",
        "-f",
        "replay.log",
        "--json",
        "steps.toml",
    ]);

    assert_eq!(args.config_file, Some(PathBuf::from("custom.toml")));
    assert_eq!(args.duplicate_policy.as_deref(), Some("replace"));
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("ext"));
    assert_eq!(args.log_file, Some(PathBuf::from("replay.log")));
    assert!(args.json);
}

#[test]
fn test_invalid_choices_are_rejected() {
    assert!(Args::try_parse_from([COMMAND_NAME, "-d", "ignore", "s.toml"]).is_err());
    assert!(Args::try_parse_from([COMMAND_NAME, "-l", "loud", "s.toml"]).is_err());
    assert!(Args::try_parse_from([COMMAND_NAME, "-o", "xml", "s.toml"]).is_err());
}

#[test]
fn test_color_flags_conflict() {
    assert!(Args::try_parse_from([COMMAND_NAME, "--color", "--no-color", "s.toml"]).is_err());
}

#[test]
fn test_cli_overrides_file_config() {
    let mut config = FileConfig::default();
    config.color = Some(true);
    config.logging.level = "info".to_string();

    let args = parse(&["-d", "replace", "-o", "json", "--no-color", "s.toml"]);
    args.apply_to(&mut config).unwrap();

    assert_eq!(config.manager.duplicate_policy, DuplicatePolicy::Replace);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.color, Some(false));
}

#[test]
fn test_absent_options_leave_config_untouched() {
    let mut config = FileConfig::default();
    config.manager.duplicate_policy = DuplicatePolicy::Replace;
    config.color = Some(false);
    let expected = config.clone();

    parse(&["s.toml"]).apply_to(&mut config).unwrap();

    assert_eq!(config, expected);
}

#[test]
fn test_apply_rejects_unparseable_values() {
    let mut args = parse(&["s.toml"]);
    args.duplicate_policy = Some("sometimes".to_string());

    let result = args.apply_to(&mut FileConfig::default());

    assert!(matches!(result, Err(AppError::InvalidOption { .. })));
}

#[test]
fn test_resolve_color_prefers_explicit_setting() {
    assert!(resolve_color(Some(true)));
    assert!(!resolve_color(Some(false)));
}
