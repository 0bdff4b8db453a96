//! # Modkit Kernel
//!
//! Composition root of the loader.
//!
//! - **Bootstrapping**: [`Loader`](bootstrap::Loader) wires discovery,
//!   resolution, scheduling and instantiation together and hands back a
//!   [`PluginRegistry`](crate::plugin_system::PluginRegistry).
//! - **Core Constants**: names, default directories and the embedded
//!   manifest symbol in [`constants`].
//! - **Error Handling**: the aggregated [`Error`](error::Error) and its
//!   `Result` alias.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::{LoadPlan, Loader};
pub use error::{Error, Result};
