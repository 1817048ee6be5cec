//! Peak usage collection for the tenured-generation pool.
//!
//! One query opens one management session, picks the tenured pool, reads
//! its peak usage and usage threshold, and closes the session again. Nothing
//! is cached or retried between queries.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{select_tenured_pool, ConnectionTarget, MemoryPoolUsageSnapshot, PoolSelector};
use crate::error::{ConnectionError, Result};
use crate::port::outbound::management::{ManagementConnector, ManagementSession};

/// Default bound on opening a management session.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reads peak usage of the tenured pool from a remote runtime.
pub struct PeakUsageCollector {
    connector: Arc<dyn ManagementConnector>,
    selector: PoolSelector,
    connect_timeout: Duration,
}

impl PeakUsageCollector {
    pub fn new(connector: Arc<dyn ManagementConnector>) -> Self {
        Self {
            connector,
            selector: PoolSelector::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_selector(mut self, selector: PoolSelector) -> Self {
        self.selector = selector;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Query the tenured pool's peak usage on `target`.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the session cannot be opened within the
    /// connect timeout or a read fails, and a pool error if the tenured pool
    /// cannot be identified. An unsupported usage threshold is not an error;
    /// the snapshot carries no threshold instead.
    pub async fn query(&self, target: &ConnectionTarget) -> Result<MemoryPoolUsageSnapshot> {
        let url = target.service_url();
        debug!(transport = self.connector.name(), url = %url, "opening management session");

        let session = tokio::time::timeout(self.connect_timeout, self.connector.connect(&url))
            .await
            .map_err(|_| ConnectionError::Timeout {
                endpoint: target.to_string(),
                after: self.connect_timeout,
            })??;

        let result = self.collect(session.as_ref()).await;

        if let Err(e) = session.close().await {
            warn!(error = %e, target = %target, "failed to close management session");
        }

        result
    }

    async fn collect(&self, session: &dyn ManagementSession) -> Result<MemoryPoolUsageSnapshot> {
        let pools = session.memory_pools().await?;
        debug!(count = pools.len(), "memory pools listed");

        let pool = select_tenured_pool(&pools, session.pool_order(), &self.selector)?;
        let peak = session.peak_usage(pool).await?;

        let threshold = match session.usage_threshold(pool).await {
            Ok(threshold) => Some(threshold),
            Err(e) if e.is_unsupported_operation() => {
                info!(pool = %pool.name, "usage threshold not supported");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(MemoryPoolUsageSnapshot::new(peak, threshold))
    }
}
