//! Logging Tests

use switchboard_infrastructure::constants::{DEFAULT_LOG_LEVEL, LOG_MAX_FILES};
use std::io::Write;
use switchboard_infrastructure::logging::{LoggingConfig, file_appender, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level(" error ").unwrap(), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
    assert_eq!(config.max_files, LOG_MAX_FILES);
}

#[test]
fn test_init_logging_rejects_bad_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(config).is_err());
}

#[test]
fn test_init_logging_only_once() {
    let first = init_logging(LoggingConfig::default());
    let second = init_logging(LoggingConfig::default());
    // Exactly one global subscriber can be installed per process
    assert!(first.is_err() || second.is_err());
}

#[test]
fn test_file_appender_absent_without_file_output() {
    assert!(file_appender(&LoggingConfig::default()).unwrap().is_none());
}

#[test]
fn test_file_appender_writes_prefixed_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        file_output: Some(dir.path().join("resolver.log")),
        max_files: 2,
        ..LoggingConfig::default()
    };

    let mut appender = file_appender(&config).unwrap().expect("appender");
    appender.write_all(b"resolved cache\n").unwrap();
    appender.flush().unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("resolver"));
}
