//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!      ┌──────────────────────────┐
//!      │   ProtocolDispatcher     │  adapter::inbound::cli
//!      └─────┬──────────────┬─────┘
//!            │              │
//!            ▼              ▼
//!  ┌──────────────┐ ┌──────────────────────┐
//!  │TargetResolver│ │ PeakUsageCollector   │  application
//!  │  (config)    │ └──────────┬───────────┘
//!  └──────────────┘            ▼
//!                   ┌──────────────────────┐
//!                   │ ManagementConnector  │  adapter::outbound::jolokia
//!                   └──────────────────────┘
//! ```

pub mod outbound;

pub use outbound::management::{ManagementConnector, ManagementSession};
pub use outbound::resolver::TargetResolver;
