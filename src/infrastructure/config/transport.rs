//! Management transport configuration.

use std::time::Duration;

use serde::Deserialize;

/// How the Jolokia endpoint is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Agent running inside the target JVM, at `<scheme>://<host>:<port><path>`.
    #[default]
    Direct,
    /// Shared Jolokia proxy forwarding to the target's JMX service URL.
    Proxy,
}

/// Jolokia transport configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub mode: TransportMode,
    /// URL scheme for direct mode (default: "http").
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Agent path for direct mode (default: "/jolokia/").
    #[serde(default = "default_path")]
    pub path: String,
    /// Proxy endpoint, required in proxy mode.
    #[serde(default)]
    pub proxy_url: Option<String>,
    /// Per-request timeout in seconds (default: 5).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_scheme() -> String {
    "http".into()
}

fn default_path() -> String {
    "/jolokia/".into()
}

const fn default_request_timeout_secs() -> u64 {
    5
}

impl TransportConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::default(),
            scheme: default_scheme(),
            path: default_path(),
            proxy_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
