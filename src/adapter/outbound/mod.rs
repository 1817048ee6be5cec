//! Outbound adapters (driven side).

pub mod jolokia;
pub mod resolver;
