//! Fetch-value mode: resolve, collect, render.

use std::sync::Arc;

use tracing::{debug, info};

use super::protocol::render_values;
use crate::application::PeakUsageCollector;
use crate::error::Result;
use crate::port::outbound::resolver::TargetResolver;

/// Turns a target identifier into the five protocol value lines.
///
/// The result is rendered completely before anything is returned, so a
/// failure at any step yields no metric lines at all.
pub struct ProtocolDispatcher {
    resolver: Arc<dyn TargetResolver>,
    collector: PeakUsageCollector,
}

impl ProtocolDispatcher {
    pub fn new(resolver: Arc<dyn TargetResolver>, collector: PeakUsageCollector) -> Self {
        Self {
            resolver,
            collector,
        }
    }

    /// Poll `identifier` and render its value lines.
    ///
    /// # Errors
    ///
    /// Returns a resolution error for unknown or malformed identifiers and
    /// propagates connection and pool errors from the collector.
    pub async fn fetch(&self, identifier: &str) -> Result<String> {
        let target = self.resolver.resolve(identifier)?;
        debug!(identifier, target = %target, "target resolved");

        let snapshot = self.collector.query(&target).await?;
        info!(
            identifier,
            used = snapshot.used(),
            committed = snapshot.committed(),
            "peak usage collected"
        );

        Ok(render_values(&snapshot))
    }
}
