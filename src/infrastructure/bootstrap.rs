//! Composition root: wire configured adapters into the dispatcher.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::inbound::cli::ProtocolDispatcher;
use crate::adapter::outbound::jolokia::JolokiaConnector;
use crate::adapter::outbound::resolver::ConfigResolver;
use crate::application::PeakUsageCollector;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::management::ManagementConnector;

/// Build the management connector for the configured transport.
pub(crate) fn build_connector(config: &Config) -> Result<Arc<dyn ManagementConnector>> {
    let connector = JolokiaConnector::new(config.transport.clone())?;
    debug!(mode = ?config.transport.mode, "jolokia transport configured");
    Ok(Arc::new(connector))
}

/// Build the collector from configuration.
pub(crate) fn build_collector(config: &Config) -> Result<PeakUsageCollector> {
    Ok(PeakUsageCollector::new(build_connector(config)?)
        .with_selector(config.collector.selector())
        .with_connect_timeout(config.collector.connect_timeout()))
}

/// Build the fetch-mode dispatcher from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client for the transport cannot be built.
pub fn build_dispatcher(config: &Config) -> Result<ProtocolDispatcher> {
    let resolver = ConfigResolver::new(config.targets.clone());
    Ok(ProtocolDispatcher::new(
        Arc::new(resolver),
        build_collector(config)?,
    ))
}
