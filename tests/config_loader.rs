use std::path::PathBuf;

use tempfile::TempDir;
use vmlaunch::args::{AbiRange, CURRENT_ABI_VERSION, OLDEST_SUPPORTED_ABI_VERSION};
use vmlaunch::config::{AbiConfig, Config, ConfigError};

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.devtool.snapshot.is_none());
    assert!(config.devtool.search_dirs.is_empty());
    assert_eq!(config.abi.oldest_supported, OLDEST_SUPPORTED_ABI_VERSION);
    assert_eq!(config.abi.current, CURRENT_ABI_VERSION);
    assert_eq!(config.log.filter, "warn");
    assert_eq!(config.abi.range(), AbiRange::default());
    assert!(!config.runtime.run_from_app_snapshot);
}

/// Test that a missing file yields the defaults.
#[test]
fn test_load_missing_file_returns_default() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config.log.filter, "warn");
}

/// Test that all sections parse.
#[test]
fn test_load_full_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[devtool]
snapshot = "/opt/sdk/bin/snapshots/dartdev.dart.snapshot"
search_dirs = ["/opt/sdk/bin", "/usr/lib/sdk/bin"]

[abi]
oldest_supported = 10
current = 12

[log]
filter = "vmlaunch=debug"

[runtime]
run_from_app_snapshot = true
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config.devtool.snapshot,
        Some(PathBuf::from("/opt/sdk/bin/snapshots/dartdev.dart.snapshot"))
    );
    assert_eq!(config.devtool.search_dirs.len(), 2);
    assert_eq!(
        config.abi.range(),
        AbiRange {
            oldest: 10,
            current: 12
        }
    );
    assert_eq!(config.log.filter, "vmlaunch=debug");
    assert!(config.runtime.run_from_app_snapshot);
}

/// Test that omitted keys fall back to their defaults.
#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[abi]\ncurrent = 30\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.abi.oldest_supported, OLDEST_SUPPORTED_ABI_VERSION);
    assert_eq!(config.abi.current, 30);
    assert!(config.devtool.search_dirs.is_empty());
}

/// Test that malformed TOML is a parse error naming the file.
#[test]
fn test_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[abi\ncurrent = ").unwrap();

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ParseError { path: p, .. } => assert_eq!(p, path),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

/// Test validation fails when the ABI range is inverted.
#[test]
fn test_validation_fails_inverted_abi_range() {
    let config = Config {
        abi: AbiConfig {
            oldest_supported: 5,
            current: 4,
        },
        ..Config::default()
    };

    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("abi.oldest_supported"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

/// Test that a single-version ABI range is allowed.
#[test]
fn test_validation_allows_single_version() {
    let config = Config {
        abi: AbiConfig {
            oldest_supported: 7,
            current: 7,
        },
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}
