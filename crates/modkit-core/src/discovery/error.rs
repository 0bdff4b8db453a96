//! # Modkit Discovery Errors
//!
//! Failures raised while turning files on disk into descriptors. Descriptor
//! level problems (bad fields, duplicate ids) keep their
//! [`PluginSystemError`] form and are wrapped, not re-described.
use std::path::PathBuf;

use thiserror::Error;

use crate::plugin_system::error::PluginSystemError;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("I/O error during operation '{operation}' on path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest at '{}': {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to open mod binary '{}': {source}", .path.display())]
    Library {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Invalid embedded manifest in '{}': {message}", .path.display())]
    EmbeddedManifest { path: PathBuf, message: String },

    #[error(transparent)]
    PluginSystem(#[from] PluginSystemError),
}

impl DiscoveryError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        DiscoveryError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
