//! Config loading tests: defaults, partial files, unknown fields and
//! validation.

use memio_common::config::{ConfigError, ConfigLoader, DemoConfig, LogLevel};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn missing_file_is_reported() {
    let result = DemoConfig::load(Path::new("/nonexistent/path/memio.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}

#[test]
fn no_path_uses_defaults() {
    let config = DemoConfig::load_or_default(None).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Info);
    assert_eq!(config.demo.dividend, 10);
    assert_eq!(config.demo.divisor, 2);
    assert_eq!(config.demo.input, "0");
}

#[test]
fn full_file_overrides_defaults() {
    let file = write_config(
        r#"
[shared]
log_level = "debug"
service_name = "memio-test"

[demo]
greeting = ["a", "b"]
seed_text = "x\ny"
seed_bytes = [1, 2, 3]
dividend = 7
divisor = 0
input = "abc"
"#,
    );

    let config = DemoConfig::load_or_default(Some(file.path())).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Debug);
    assert_eq!(config.shared.service_name, "memio-test");
    assert_eq!(config.demo.greeting, ["a", "b"]);
    assert_eq!(config.demo.seed_text, "x\ny");
    assert_eq!(config.demo.seed_bytes, [1, 2, 3]);
    assert_eq!(config.demo.dividend, 7);
    assert_eq!(config.demo.divisor, 0);
    assert_eq!(config.demo.input, "abc");
}

#[test]
fn partial_demo_section_keeps_other_defaults() {
    let file = write_config("[demo]\ndivisor = 5\n");
    let config = DemoConfig::load_or_default(Some(file.path())).unwrap();
    assert_eq!(config.demo.divisor, 5);
    assert_eq!(config.demo.seed_text, "Hello!\nHi!\nGoodbye!");
    assert_eq!(config.shared.service_name, "memio");
}

#[test]
fn unknown_demo_field_is_parse_error() {
    let file = write_config("[demo]\ndivisr = 5\n");
    let result = DemoConfig::load_or_default(Some(file.path()));
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn invalid_toml_is_parse_error() {
    let file = write_config("invalid toml {{{{");
    let result = DemoConfig::load(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn empty_service_name_fails_validation() {
    let file = write_config("[shared]\nservice_name = \"\"\n");
    let result = DemoConfig::load_or_default(Some(file.path()));
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}
