//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`management`]: in-memory [`ManagementConnector`](crate::port::ManagementConnector)
//!   with scripted pools, usages and threshold replies.
//! - [`resolver`]: map-backed [`TargetResolver`](crate::port::TargetResolver).

pub mod management;
pub mod resolver;
