//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use tempfile::NamedTempFile;

use shell_exec::cli::{parse_args_from, Args};
use shell_exec::config::Config;

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("shell-exec")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.config.is_none());
    assert!(result.prompt.is_none());
    assert!(result.log_level.is_none());
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&["-P", "$ ", "-l", "debug"])).unwrap();

    assert_eq!(result.prompt, Some("$ ".to_string()));
    assert_eq!(result.log_level, Some("debug".to_string()));
}

#[test]
fn test_cli_config_file() {
    let result = parse_args_from(args(&["-c", "/etc/shell-exec.json"])).unwrap();

    assert!(result.config.is_some());
    assert_eq!(
        result.config.unwrap().to_str().unwrap(),
        "/etc/shell-exec.json"
    );
}

#[test]
fn test_cli_rejects_positional_arguments() {
    let result = parse_args_from(args(&["stray-line"]));
    assert!(result.is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let json = r#"{
        "shell": {
            "prompt": "% "
        },
        "logging": {
            "level": "trace"
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.shell.prompt, "% ");
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_config_priority_args_over_file() {
    let json = r#"{
        "shell": {
            "prompt": "from-file> "
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let cli_args = Args {
        config: Some(file.path().to_path_buf()),
        prompt: Some("from-args> ".to_string()),
        ..Args::default()
    };

    let config = Config::load(&cli_args).unwrap();
    assert_eq!(config.shell.prompt, "from-args> ");
}

#[test]
fn test_config_missing_file_is_an_error() {
    let cli_args = Args {
        config: Some("/definitely/not/a/real/config.json".into()),
        ..Args::default()
    };

    assert!(Config::load(&cli_args).is_err());
}
