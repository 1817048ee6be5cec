//! Scripted management transport.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{JmxServiceUrl, MemoryPoolInfo, MemoryUsage, PoolOrder, PoolType};
use crate::error::{ConnectionError, Error, Result};
use crate::port::outbound::management::{ManagementConnector, ManagementSession};

/// What a pool answers when its usage threshold is read.
#[derive(Debug, Clone)]
pub enum ThresholdReply {
    Value(u64),
    Unsupported,
    /// Fail with a transport error carrying this message.
    Fail(String),
}

#[derive(Debug, Clone, Default)]
struct Runtime {
    pools: Vec<MemoryPoolInfo>,
    usage: HashMap<String, MemoryUsage>,
    thresholds: HashMap<String, ThresholdReply>,
    order: PoolOrder,
}

/// In-memory [`ManagementConnector`] serving a fixed pool layout.
#[derive(Debug, Default)]
pub struct StaticManagement {
    runtime: Arc<Runtime>,
    refuse: Option<String>,
    connect_delay: Option<Duration>,
    connected: Mutex<Vec<String>>,
    closes: Arc<AtomicUsize>,
}

impl StaticManagement {
    pub fn new() -> Self {
        Self::default()
    }

    /// HotSpot parallel collector layout with `PS Old Gen` as tenured pool.
    pub fn parallel_gc(tenured: MemoryUsage, threshold: ThresholdReply) -> Self {
        let small = MemoryUsage {
            committed: 1024,
            init: 1024,
            max: -1,
            used: 512,
        };
        Self::new()
            .with_pool(
                MemoryPoolInfo::new("Code Cache", PoolType::NonHeap),
                small,
                ThresholdReply::Value(0),
            )
            .with_pool(
                MemoryPoolInfo::new("PS Eden Space", PoolType::Heap),
                small,
                ThresholdReply::Unsupported,
            )
            .with_pool(
                MemoryPoolInfo::new("PS Survivor Space", PoolType::Heap),
                small,
                ThresholdReply::Unsupported,
            )
            .with_pool(MemoryPoolInfo::new("PS Old Gen", PoolType::Heap), tenured, threshold)
    }

    /// Append a pool; pools are listed in insertion order.
    #[must_use]
    pub fn with_pool(
        mut self,
        pool: MemoryPoolInfo,
        usage: MemoryUsage,
        threshold: ThresholdReply,
    ) -> Self {
        let runtime = Arc::make_mut(&mut self.runtime);
        runtime.usage.insert(pool.name.clone(), usage);
        runtime.thresholds.insert(pool.name.clone(), threshold);
        runtime.pools.push(pool);
        self
    }

    /// Report the pool listing as having `order`.
    #[must_use]
    pub fn with_pool_order(mut self, order: PoolOrder) -> Self {
        Arc::make_mut(&mut self.runtime).order = order;
        self
    }

    /// Refuse every connection with `reason`.
    #[must_use]
    pub fn refusing(mut self, reason: impl Into<String>) -> Self {
        self.refuse = Some(reason.into());
        self
    }

    /// Delay session opening, for timeout tests.
    #[must_use]
    pub const fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    /// Service URLs of every connection attempt, in order.
    pub fn connected_urls(&self) -> Vec<String> {
        self.connected
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }

    /// Number of sessions closed so far.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManagementConnector for StaticManagement {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn connect(&self, url: &JmxServiceUrl) -> Result<Box<dyn ManagementSession>> {
        if let Ok(mut urls) = self.connected.lock() {
            urls.push(url.to_string());
        }
        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(reason) = &self.refuse {
            return Err(ConnectionError::Transport(reason.clone()).into());
        }
        Ok(Box::new(StaticSession {
            runtime: Arc::clone(&self.runtime),
            closes: Arc::clone(&self.closes),
        }))
    }
}

struct StaticSession {
    runtime: Arc<Runtime>,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl ManagementSession for StaticSession {
    async fn memory_pools(&self) -> Result<Vec<MemoryPoolInfo>> {
        Ok(self.runtime.pools.clone())
    }

    fn pool_order(&self) -> PoolOrder {
        self.runtime.order
    }

    async fn peak_usage(&self, pool: &MemoryPoolInfo) -> Result<MemoryUsage> {
        self.runtime.usage.get(&pool.name).copied().ok_or_else(|| {
            ConnectionError::Remote {
                status: 404,
                error_type: "javax.management.InstanceNotFoundException".into(),
                message: pool.name.clone(),
            }
            .into()
        })
    }

    async fn usage_threshold(&self, pool: &MemoryPoolInfo) -> Result<u64> {
        match self.runtime.thresholds.get(&pool.name) {
            Some(ThresholdReply::Value(value)) => Ok(*value),
            Some(ThresholdReply::Unsupported) | None => Err(Error::UnsupportedOperation(format!(
                "Usage threshold is not supported by {}",
                pool.name
            ))),
            Some(ThresholdReply::Fail(reason)) => {
                Err(ConnectionError::Transport(reason.clone()).into())
            }
        }
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
