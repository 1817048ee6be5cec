//! Transport-agnostic domain types: targets, memory pools and snapshots.

pub mod error;
mod memory;
mod pool;
mod target;

pub use memory::{MemoryPoolInfo, MemoryPoolUsageSnapshot, MemoryUsage, PoolType, SnapshotField};
pub use pool::{select_tenured_pool, PoolOrder, PoolSelector};
pub use target::{ConnectionTarget, JmxServiceUrl};
