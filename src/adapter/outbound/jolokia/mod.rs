//! Jolokia (JMX over HTTP) management transport.
//!
//! Provides an implementation of the [`ManagementConnector`] port that talks
//! the Jolokia JSON protocol, either to an agent inside the target JVM or to
//! a proxy that forwards to the target's JMX service URL.
//!
//! [`ManagementConnector`]: crate::port::ManagementConnector

mod connector;
mod dto;

pub use connector::JolokiaConnector;
