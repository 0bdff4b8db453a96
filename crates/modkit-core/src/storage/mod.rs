//! # Modkit Storage
//!
//! Configuration files: the loader's own [`LoaderConfig`] and the
//! per-mod settings kept by [`ModConfigStore`] and restored before each
//! reload.
pub mod config;
pub mod error;

pub use config::{ConfigData, ConfigFormat, ConfigSource, LoaderConfig, ModConfigStore};
pub use error::StorageSystemError;
