//! Monitored target entries.

use serde::Deserialize;

/// Connection coordinates of one monitored runtime, `[targets.<id>]`.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub host: String,
    pub port: u16,
}
