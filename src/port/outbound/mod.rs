//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the plugin's external collaborators: the
//! configuration source that knows where targets live and the remote
//! management transport.

pub mod management;
pub mod resolver;
