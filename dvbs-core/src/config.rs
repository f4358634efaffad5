//! Configuration types for the DVB-S encoder and its host applications.

use serde::{Deserialize, Serialize};

use crate::convolutional::CodeRate;
use crate::errors::{DvbsError, Result};
use crate::logging::LogConfig;

/// Configuration for a [`crate::encoder::DvbsEncoder`] instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Inner convolutional code rate.
    #[serde(default)]
    pub code_rate: CodeRate,

    /// Logging verbosity and subsystem filters. Not persisted; hosts that
    /// need a specific logging posture construct it in code.
    #[serde(skip, default)]
    pub log: LogConfig,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            code_rate: CodeRate::default(),
            log: LogConfig::default(),
        }
    }
}

impl EncoderConfig {
    /// Parse an [`EncoderConfig`] from a standalone TOML document, e.g. a
    /// config fragment embedded by a host application.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| DvbsError::Config(e.to_string()))
    }
}
