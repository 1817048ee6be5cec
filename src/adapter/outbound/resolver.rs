//! Target resolution from the plugin configuration file.

use std::collections::BTreeMap;

use crate::domain::ConnectionTarget;
use crate::error::{ResolutionError, Result};
use crate::infrastructure::config::target::TargetConfig;
use crate::port::outbound::resolver::TargetResolver;

/// Resolves identifiers against the `[targets.<id>]` tables.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    targets: BTreeMap<String, TargetConfig>,
}

impl ConfigResolver {
    pub const fn new(targets: BTreeMap<String, TargetConfig>) -> Self {
        Self { targets }
    }
}

impl TargetResolver for ConfigResolver {
    fn resolve(&self, identifier: &str) -> Result<ConnectionTarget> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ResolutionError::MalformedTarget {
                identifier: identifier.to_string(),
                reason: "identifier is empty".into(),
            }
            .into());
        }

        let entry = self
            .targets
            .get(identifier)
            .ok_or_else(|| ResolutionError::UnknownTarget {
                identifier: identifier.to_string(),
            })?;

        let host = entry.host.trim();
        if host.is_empty() {
            return Err(ResolutionError::MalformedTarget {
                identifier: identifier.to_string(),
                reason: "host is empty".into(),
            }
            .into());
        }
        if entry.port == 0 {
            return Err(ResolutionError::MalformedTarget {
                identifier: identifier.to_string(),
                reason: "port must be greater than 0".into(),
            }
            .into());
        }

        Ok(ConnectionTarget::new(host, entry.port))
    }
}
