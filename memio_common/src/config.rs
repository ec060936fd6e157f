//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the TOML configuration
//! of the demonstration runner.
//!
//! # Usage
//!
//! ```rust,no_run
//! use memio_common::config::{ConfigLoader, DemoConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = DemoConfig::load(Path::new("memio.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use crate::error::Error;
use crate::kind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for Error {
    #[track_caller]
    fn from(e: ConfigError) -> Self {
        let kind = match e {
            ConfigError::FileNotFound => &kind::OS,
            ConfigError::ParseError(_) | ConfigError::ValidationError(_) => &kind::VALUE,
        };
        Error::new(kind, e.to_string())
    }
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "memio"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: "memio".to_string(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inputs used by the demonstrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoSettings {
    /// Chunks written one by one into a text stream.
    pub greeting: Vec<String>,
    /// Content a text stream is seeded with before reading lines.
    pub seed_text: String,
    /// Content a byte stream is seeded with before reading.
    pub seed_bytes: Vec<u8>,
    /// Left operand of the guarded division.
    pub dividend: i64,
    /// Right operand of the guarded division.
    pub divisor: i64,
    /// Text handed to the parse-then-divide demonstrations.
    pub input: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            greeting: vec!["Hello".to_string(), " ".to_string(), "world!".to_string()],
            seed_text: "Hello!\nHi!\nGoodbye!".to_string(),
            seed_bytes: "中文".as_bytes().to_vec(),
            dividend: 10,
            divisor: 2,
            input: "0".to_string(),
        }
    }
}

/// Top-level configuration file of the `memio` runner.
///
/// Every section is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub demo: DemoSettings,
}

impl DemoConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    /// - `greeting` has no chunks
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        if self.demo.greeting.is_empty() {
            return Err(ConfigError::ValidationError(
                "demo.greeting needs at least one chunk".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate `path`, or use defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestWrapper {
            level: LogLevel,
        }

        for (text, level) in [
            ("trace", LogLevel::Trace),
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("error", LogLevel::Error),
        ] {
            let parsed: TestWrapper = toml::from_str(&format!("level = \"{text}\"")).unwrap();
            assert_eq!(parsed.level, level);
        }
    }

    #[test]
    fn test_log_level_to_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }

    #[test]
    fn test_shared_config_validation_empty_service_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_demo_defaults_are_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.demo.seed_bytes, b"\xe4\xb8\xad\xe6\x96\x87");
        assert_eq!(config.shared.service_name, "memio");
    }

    #[test]
    fn test_empty_greeting_rejected() {
        let mut config = DemoConfig::default();
        config.demo.greeting.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_error_to_error_kind() {
        let e: Error = ConfigError::FileNotFound.into();
        assert!(e.is(&kind::OS));
        let e: Error = ConfigError::ParseError("x".into()).into();
        assert!(e.is(&kind::VALUE));
    }
}
