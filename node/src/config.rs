//! Oracle configuration with TOML file support.

use serde::{Deserialize, Serialize};

use sibyl_ledger::GenesisConfig;
use sibyl_types::ProtocolParams;

use crate::error::OracleError;

/// Configuration for an oracle instance.
///
/// Can be loaded from a TOML file via [`OracleConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Protocol parameters (stake amount, withdraw lock period).
    #[serde(default)]
    pub params: ProtocolParams,

    /// Initial balance allocations minted at startup.
    #[serde(default)]
    pub genesis: GenesisConfig,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl OracleConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, OracleError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| OracleError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, OracleError> {
        toml::from_str(s).map_err(|e| OracleError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("OracleConfig is always serializable to TOML")
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            params: ProtocolParams::default(),
            genesis: GenesisConfig::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
