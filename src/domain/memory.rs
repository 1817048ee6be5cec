//! Memory pool descriptors and usage snapshots.

/// Memory pool classification reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolType {
    Heap,
    NonHeap,
}

impl PoolType {
    /// Parse the runtime's `Type` attribute (`HEAP` / `NON_HEAP`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HEAP" => Some(Self::Heap),
            "NON_HEAP" | "NON-HEAP" | "NONHEAP" => Some(Self::NonHeap),
            _ => None,
        }
    }
}

/// A memory pool as listed by the remote runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPoolInfo {
    /// Pool name, e.g. `PS Old Gen`.
    pub name: String,
    pub pool_type: PoolType,
}

impl MemoryPoolInfo {
    pub fn new(name: impl Into<String>, pool_type: PoolType) -> Self {
        Self {
            name: name.into(),
            pool_type,
        }
    }

    #[must_use]
    pub fn is_heap(&self) -> bool {
        self.pool_type == PoolType::Heap
    }
}

/// Raw memory usage as reported by the runtime.
///
/// `init` and `max` are `-1` when the runtime leaves them undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    pub committed: i64,
    pub init: i64,
    pub max: i64,
    pub used: i64,
}

/// One of the five snapshot fields, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotField {
    Committed,
    Init,
    Max,
    Used,
    UsageThreshold,
}

impl SnapshotField {
    /// Fixed field order of a snapshot.
    pub const ORDER: [Self; 5] = [
        Self::Committed,
        Self::Init,
        Self::Max,
        Self::Used,
        Self::UsageThreshold,
    ];
}

/// Peak usage of one memory pool at the time of the query.
///
/// Undefined or unsupported values are `None`; they are never encoded as zero
/// because zero is a legitimate threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPoolUsageSnapshot {
    committed: u64,
    init: Option<u64>,
    max: Option<u64>,
    used: u64,
    usage_threshold: Option<u64>,
}

impl MemoryPoolUsageSnapshot {
    /// Build a snapshot from a peak-usage record and an optional threshold.
    #[must_use]
    pub fn new(peak: MemoryUsage, usage_threshold: Option<u64>) -> Self {
        Self {
            committed: non_negative(peak.committed),
            init: defined(peak.init),
            max: defined(peak.max),
            used: non_negative(peak.used),
            usage_threshold,
        }
    }

    #[must_use]
    pub const fn committed(&self) -> u64 {
        self.committed
    }

    #[must_use]
    pub const fn init(&self) -> Option<u64> {
        self.init
    }

    #[must_use]
    pub const fn max(&self) -> Option<u64> {
        self.max
    }

    #[must_use]
    pub const fn used(&self) -> u64 {
        self.used
    }

    #[must_use]
    pub const fn usage_threshold(&self) -> Option<u64> {
        self.usage_threshold
    }

    #[must_use]
    pub const fn get(&self, field: SnapshotField) -> Option<u64> {
        match field {
            SnapshotField::Committed => Some(self.committed),
            SnapshotField::Init => self.init,
            SnapshotField::Max => self.max,
            SnapshotField::Used => Some(self.used),
            SnapshotField::UsageThreshold => self.usage_threshold,
        }
    }

    /// All five fields in the fixed order committed, init, max, used, threshold.
    #[must_use]
    pub fn fields(&self) -> [(SnapshotField, Option<u64>); 5] {
        SnapshotField::ORDER.map(|field| (field, self.get(field)))
    }
}

fn defined(value: i64) -> Option<u64> {
    u64::try_from(value).ok()
}

fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
