//! CLI-specific configuration, loaded from a single TOML file.
//!
//! Unlike `chimera-cli::config::CliConfig`, this system has one config file
//! per run, so the `include`/deep-merge machinery that lets chimera-cli
//! compose several config fragments is not carried over here.

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dvbs_core::CodeRate;

/// Complete CLI configuration bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Path to the input file of concatenated 188-byte TS packets.
    pub input_path: PathBuf,

    /// Path to write the resulting IQ bit stream to.
    pub output_path: PathBuf,

    /// Inner convolutional code rate.
    #[serde(default)]
    pub code_rate: CodeRate,

    /// Abort on the first malformed packet instead of skipping it.
    #[serde(default)]
    pub strict: bool,

    /// Terminal/logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load configuration from a single TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config: CliConfig =
            toml::from_str(&content).wrap_err("failed to parse TOML configuration")?;
        Ok(config)
    }
}

/// Logging output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_target")]
    pub target: LogTarget,

    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

fn default_log_target() -> LogTarget {
    LogTarget::Stderr
}

fn default_log_format() -> LogFormat {
    LogFormat::Json
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: default_log_target(),
            file_path: None,
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    Stderr,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LoggingConfig {
    /// Convert the CLI-level log level into the core crate's `LogConfig`,
    /// using the default subsystem filters (all enabled).
    pub fn to_core_log_config(&self) -> dvbs_core::LogConfig {
        use dvbs_core::LogLevel as CoreLogLevel;

        let level = match self.level {
            LogLevel::Debug => CoreLogLevel::Debug,
            LogLevel::Info => CoreLogLevel::Info,
            LogLevel::Warn => CoreLogLevel::Warn,
            LogLevel::Error => CoreLogLevel::Error,
        };

        dvbs_core::LogConfig {
            level,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let toml = r#"
            input_path = "in.ts"
            output_path = "out.bin"
        "#;
        let config: CliConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.code_rate, CodeRate::R1_2);
        assert!(!config.strict);
        assert_eq!(config.logging.target, LogTarget::Stderr);
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
            input_path = "in.ts"
            output_path = "out.bin"
            code_rate = "R5_6"
            strict = true

            [logging]
            target = "stdout"
            format = "json"
            level = "debug"
        "#;
        let config: CliConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.code_rate, CodeRate::R5_6);
        assert!(config.strict);
        assert_eq!(config.logging.target, LogTarget::Stdout);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }
}
