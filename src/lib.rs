//! Peakusage - Munin plugin for JVM tenured-generation peak usage.
//!
//! Invoked once per polling interval by `munin-node`. With the argument
//! `config` it prints the graph definition; with a target identifier it
//! connects to that JVM, reads the peak usage of its old-generation memory
//! pool and prints five `<Label>.value N` lines.
//!
//! # Architecture
//!
//! - **`adapter::inbound::cli`** - Protocol handling (`ProtocolDispatcher`)
//! - **`application`** - `PeakUsageCollector`: session, pool selection, reads
//! - **`port`** - `TargetResolver` and `ManagementConnector` seams
//! - **`adapter::outbound`** - Config-file resolver and Jolokia transport
//!
//! # Modules
//!
//! - [`adapter`] - Inbound CLI and outbound transport/resolver adapters
//! - [`application`] - The peak usage collector
//! - [`domain`] - Targets, memory pools, snapshots, pool selection
//! - [`error`] - Error types for the crate
//! - [`infrastructure`] - Configuration loading and wiring
//! - [`port`] - Trait definitions for external collaborators
//!
//! # Features
//!
//! - `testkit` - In-memory transport and resolver for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use peakusage::adapter::outbound::jolokia::JolokiaConnector;
//! use peakusage::application::PeakUsageCollector;
//! use peakusage::domain::ConnectionTarget;
//! use peakusage::infrastructure::config::transport::TransportConfig;
//!
//! # async fn demo() -> peakusage::error::Result<()> {
//! let connector = JolokiaConnector::new(TransportConfig::default())?;
//! let collector = PeakUsageCollector::new(Arc::new(connector));
//! let snapshot = collector.query(&ConnectionTarget::new("10.0.0.5", 8778)).await?;
//! println!("used {} bytes", snapshot.used());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
