//! CLI module graph.
//!
//! The plugin speaks the Munin protocol: `config` declares the graph, any
//! other argument names a target whose values are fetched and printed.

pub mod command;
pub mod dispatcher;
pub mod protocol;
pub mod run;

pub use command::{Cli, Invocation};
pub use dispatcher::ProtocolDispatcher;
