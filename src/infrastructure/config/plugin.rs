//! Plugin protocol settings.

use serde::Deserialize;

/// Stream receiving the one-line diagnostic of a failed poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticStream {
    /// Standard error; stdout stays reserved for metric lines.
    #[default]
    Stderr,
    /// Standard output, for daemons that only capture stdout.
    Stdout,
}

/// Plugin protocol configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub diagnostics: DiagnosticStream,
}
