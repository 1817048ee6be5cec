//! Errors raised when the expected memory pool cannot be identified.
//!
//! # Examples
//!
//! ```
//! use peakusage::domain::error::PoolError;
//! use peakusage::domain::{select_tenured_pool, PoolOrder, PoolSelector};
//!
//! let result = select_tenured_pool(&[], PoolOrder::Runtime, &PoolSelector::default());
//! assert!(matches!(result, Err(PoolError::NoHeapPools)));
//! ```

use thiserror::Error;

/// The tenured-generation pool is absent or cannot be told apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The runtime exposes no heap memory pools at all.
    #[error("no heap memory pools exposed by the remote runtime")]
    NoHeapPools,

    /// No pool matched the configured name or the fallback position.
    #[error("memory pool not found: {wanted}")]
    NotFound {
        /// Description of what was looked for.
        wanted: String,
    },

    /// No heap pool is named like an old generation and the listing carries
    /// no runtime order to fall back on.
    #[error(
        "no heap pool looks tenured and pool order is unknown, configure the pool name explicitly (heap pools: {})",
        heap.join(", ")
    )]
    Unordered {
        /// Heap pool names as listed.
        heap: Vec<String>,
    },

    /// More than one heap pool looks like the old generation.
    #[error("ambiguous tenured pool, candidates: {}", candidates.join(", "))]
    Ambiguous {
        /// Names of the matching pools, in runtime order.
        candidates: Vec<String>,
    },
}
