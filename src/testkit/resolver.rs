//! Map-backed target resolver.

use std::collections::HashMap;

use crate::domain::ConnectionTarget;
use crate::error::{ResolutionError, Result};
use crate::port::outbound::resolver::TargetResolver;

/// Resolves identifiers from a fixed in-memory table.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    targets: HashMap<String, ConnectionTarget>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_target(mut self, identifier: impl Into<String>, target: ConnectionTarget) -> Self {
        self.targets.insert(identifier.into(), target);
        self
    }
}

impl TargetResolver for StaticResolver {
    fn resolve(&self, identifier: &str) -> Result<ConnectionTarget> {
        self.targets.get(identifier).cloned().ok_or_else(|| {
            ResolutionError::UnknownTarget {
                identifier: identifier.to_string(),
            }
            .into()
        })
    }
}
