//! Collector configuration: session timeout and pool selection.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::PoolSelector;

/// Collector configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Bound on opening the management session, in seconds (default: 5).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Exact name of the pool to report instead of auto-detecting it.
    #[serde(default)]
    pub pool: Option<String>,
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

impl CollectorConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub fn selector(&self) -> PoolSelector {
        PoolSelector {
            name: self.pool.clone(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            pool: None,
        }
    }
}
