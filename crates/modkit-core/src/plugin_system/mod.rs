//! # Modkit Plugin System
//!
//! Everything between a set of discovered descriptors and a running,
//! ordered set of plugins.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`version`]**: the `major.minor.revision` [`Version`] triple.
//! - **[`manifest`]**: [`ManifestRecord`], the raw manifest as read from JSON.
//! - **[`descriptor`]**: validated [`PluginDescriptor`]s and the
//!   duplicate-free [`DescriptorSet`].
//! - **[`constraint`]**: dependency strings (`"id"`, `"id min"`,
//!   `"id min max"`) parsed into [`Constraint`]s.
//! - **[`resolver`]**: checks that every constraint is met by the set.
//! - **[`scheduler`]**: turns ordering declarations into one deterministic
//!   load order, or reports the cycle that prevents one.
//! - **[`traits`]**: the [`Plugin`] lifecycle hooks and the
//!   [`PluginFactory`] instantiation capability.
//! - **[`factory`]**: [`StaticFactory`], an explicit constructor table.
//! - **[`registry`]**: [`PluginRegistry`], which owns the instances and
//!   drives them through each [`LifecycleStage`].
//! - **[`error`]**: [`PluginSystemError`].
pub mod constraint;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod scheduler;
pub mod stage;
pub mod traits;
pub mod version;

pub use constraint::{Constraint, ConstraintKind, Requirement};
pub use descriptor::{DescriptorBuilder, DescriptorSet, PluginDescriptor};
pub use error::PluginSystemError;
pub use factory::StaticFactory;
pub use manifest::ManifestRecord;
pub use registry::PluginRegistry;
pub use stage::{Hook, LifecycleStage};
pub use traits::{HookError, HookResult, Plugin, PluginFactory, ReloadContext};
pub use version::Version;
