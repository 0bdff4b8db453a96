pub mod discovery;
pub mod kernel;
pub mod plugin_system;
pub mod storage;

pub use kernel::error::Error as KernelError;
pub use kernel::{LoadPlan, Loader};
pub use plugin_system::{
    DescriptorSet, Plugin, PluginDescriptor, PluginFactory, PluginRegistry, StaticFactory, Version,
};
pub use storage::{LoaderConfig, ModConfigStore};

#[cfg(test)]
mod tests;
