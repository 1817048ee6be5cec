//! Target resolution port.

use crate::domain::ConnectionTarget;
use crate::error::Result;

/// Maps a target identifier (the plugin's command-line argument) to
/// connection coordinates.
pub trait TargetResolver: Send + Sync {
    /// Resolve `identifier` to a host and port.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`](crate::error::ResolutionError) if the
    /// identifier is unknown or its entry is malformed.
    fn resolve(&self, identifier: &str) -> Result<ConnectionTarget>;
}
