//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all plugin settings.
//! Configuration is loaded from a TOML file; only fetch mode reads it.
//!
//! # Example
//!
//! ```no_run
//! use peakusage::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("/etc/munin/peakusage.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::collector::CollectorConfig;
use super::logging::LoggingConfig;
use super::plugin::PluginConfig;
use super::target::TargetConfig;
use super::transport::{TransportConfig, TransportMode};
use crate::error::{ConfigError, Result};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/munin/peakusage.toml";

/// Main plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Protocol output settings.
    #[serde(default)]
    pub plugin: PluginConfig,

    /// Session timeout and pool selection.
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Jolokia transport settings.
    #[serde(default)]
    pub transport: TransportConfig,

    /// Monitored targets keyed by the identifier passed on the command line.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.collector.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.transport.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.collector.pool.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "pool",
                reason: "must not be empty when set".to_string(),
            }
            .into());
        }

        match self.transport.mode {
            TransportMode::Direct => {
                if !matches!(self.transport.scheme.as_str(), "http" | "https") {
                    return Err(ConfigError::InvalidValue {
                        field: "scheme",
                        reason: format!("expected http or https, got '{}'", self.transport.scheme),
                    }
                    .into());
                }
                if !self.transport.path.starts_with('/') {
                    return Err(ConfigError::InvalidValue {
                        field: "path",
                        reason: "must start with '/'".to_string(),
                    }
                    .into());
                }
            }
            TransportMode::Proxy => match self.transport.proxy_url.as_deref() {
                None | Some("") => {
                    return Err(ConfigError::MissingField { field: "proxy_url" }.into());
                }
                Some(raw) => {
                    url::Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
                        field: "proxy_url",
                        reason: e.to_string(),
                    })?;
                }
            },
        }

        for (identifier, target) in &self.targets {
            if target.host.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "host",
                    reason: format!("target '{identifier}' has an empty host"),
                }
                .into());
            }
            if target.port == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "port",
                    reason: format!("target '{identifier}' has port 0"),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
