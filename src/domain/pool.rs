//! Tenured-generation pool selection.
//!
//! Selection order:
//!
//! 1. An explicitly configured pool name.
//! 2. The single heap pool whose name looks like an old generation
//!    (`Tenured Gen`, `PS Old Gen`, `G1 Old Gen`, `ZGC Old Generation`, ...).
//! 3. The second heap pool in runtime order, which is where HotSpot's
//!    serial and parallel collectors list their old generation. Only taken
//!    when the pool list is known to be in runtime order.

use tracing::debug;

use super::error::PoolError;
use super::memory::MemoryPoolInfo;

/// Name fragments identifying an old-generation pool, lowercase.
const TENURED_PATTERNS: [&str; 2] = ["tenured", "old gen"];

/// Index among heap pools used when no name matches.
const TENURED_HEAP_POSITION: usize = 1;

/// Whether a pool listing preserves the runtime's own pool order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolOrder {
    /// Pools are listed in the order the runtime registered them.
    #[default]
    Runtime,
    /// Pools come back in an arbitrary order, e.g. from an MBean query.
    Unspecified,
}

/// How the tenured pool is picked out of the runtime's pool list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSelector {
    /// Exact pool name; disables pattern and positional matching.
    pub name: Option<String>,
}

impl PoolSelector {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

fn looks_tenured(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    TENURED_PATTERNS.iter().any(|pattern| name.contains(pattern))
}

/// Pick the tenured-generation pool from `pools`.
///
/// # Errors
///
/// Returns [`PoolError`] when no heap pool exists, when the configured or
/// positional pool is missing, when several pools match by name, or when
/// only a positional match is possible on an unordered listing.
pub fn select_tenured_pool<'a>(
    pools: &'a [MemoryPoolInfo],
    order: PoolOrder,
    selector: &PoolSelector,
) -> Result<&'a MemoryPoolInfo, PoolError> {
    if let Some(wanted) = selector.name.as_deref() {
        return pools
            .iter()
            .find(|pool| pool.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PoolError::NotFound {
                wanted: format!("pool named '{wanted}'"),
            });
    }

    let heap: Vec<&MemoryPoolInfo> = pools.iter().filter(|pool| pool.is_heap()).collect();
    if heap.is_empty() {
        return Err(PoolError::NoHeapPools);
    }

    let named: Vec<&MemoryPoolInfo> = heap
        .iter()
        .copied()
        .filter(|pool| looks_tenured(&pool.name))
        .collect();

    match named.as_slice() {
        [pool] => {
            debug!(pool = %pool.name, "tenured pool matched by name");
            Ok(*pool)
        }
        [] if order == PoolOrder::Unspecified => Err(PoolError::Unordered {
            heap: heap.iter().map(|pool| pool.name.clone()).collect(),
        }),
        [] => {
            let pool = heap
                .get(TENURED_HEAP_POSITION)
                .copied()
                .ok_or_else(|| PoolError::NotFound {
                    wanted: format!(
                        "heap pool #{} (only {} heap pools listed)",
                        TENURED_HEAP_POSITION + 1,
                        heap.len()
                    ),
                })?;
            debug!(pool = %pool.name, "tenured pool chosen by position");
            Ok(pool)
        }
        many => Err(PoolError::Ambiguous {
            candidates: many.iter().map(|pool| pool.name.clone()).collect(),
        }),
    }
}
