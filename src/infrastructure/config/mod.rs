//! Infrastructure configuration modules.

pub mod collector;
pub mod logging;
pub mod plugin;
pub mod settings;
pub mod target;
pub mod transport;
