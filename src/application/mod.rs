//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the plugin's fetch-value use case.

pub mod collector;

pub use collector::PeakUsageCollector;
