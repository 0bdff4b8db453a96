//! # Modkit Kernel Errors
//!
//! Defines [`Error`], the top-level error returned by the [`Loader`](super::bootstrap::Loader)
//! and the binary. Each subsystem keeps its own typed error; this enum only
//! aggregates them.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::discovery::error::DiscoveryError;
use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Resolution, ordering, instantiation or lifecycle failure
    #[error("{0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Failure while scanning for manifests
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Configuration file failure
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// The plugin system error at the root of this error, if any.
    ///
    /// Discovery wraps descriptor errors (invalid fields, duplicate ids), so
    /// this looks through that layer as well.
    pub fn plugin_system(&self) -> Option<&PluginSystemError> {
        match self {
            Error::PluginSystem(e) => Some(e),
            Error::Discovery(DiscoveryError::PluginSystem(e)) => Some(e),
            _ => None,
        }
    }
}
