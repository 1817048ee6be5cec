//! Remote management port for reading JVM memory pools.
//!
//! Models the slice of a management interface this plugin needs: open a
//! session to a runtime, list its memory pools, read a pool's peak usage and
//! read its usage threshold.

use async_trait::async_trait;

use crate::domain::{JmxServiceUrl, MemoryPoolInfo, MemoryUsage, PoolOrder};
use crate::error::Result;

/// Factory for management sessions.
///
/// Opening a session performs the network handshake; callers bound it with
/// their own timeout.
#[async_trait]
pub trait ManagementConnector: Send + Sync {
    /// Return the transport name for logging.
    fn name(&self) -> &'static str;

    /// Open a session to the runtime behind `url`.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the endpoint is unreachable or rejects
    /// the handshake.
    async fn connect(&self, url: &JmxServiceUrl) -> Result<Box<dyn ManagementSession>>;
}

/// An open session to one remote runtime.
#[async_trait]
pub trait ManagementSession: Send + Sync {
    /// List the runtime's memory pools.
    async fn memory_pools(&self) -> Result<Vec<MemoryPoolInfo>>;

    /// Whether [`memory_pools`](Self::memory_pools) preserves runtime order.
    fn pool_order(&self) -> PoolOrder {
        PoolOrder::Runtime
    }

    /// Read the peak usage of `pool`.
    async fn peak_usage(&self, pool: &MemoryPoolInfo) -> Result<MemoryUsage>;

    /// Read the configured usage threshold of `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`](crate::error::Error::UnsupportedOperation)
    /// when the pool does not support usage-threshold monitoring.
    async fn usage_threshold(&self, pool: &MemoryPoolInfo) -> Result<u64>;

    /// Release the session. The default does nothing.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
