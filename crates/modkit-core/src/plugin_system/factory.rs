use std::collections::HashMap;

use log::debug;

use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::traits::{HookError, Plugin, PluginFactory};

type Constructor = Box<dyn Fn(&PluginDescriptor) -> Box<dyn Plugin> + Send + Sync>;

/// Factory backed by an explicit table of constructors keyed by mod id.
#[derive(Default)]
pub struct StaticFactory {
    constructors: HashMap<String, Constructor>,
}

impl StaticFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for `id`, replacing any previous one.
    pub fn register<F>(&mut self, id: &str, constructor: F) -> &mut Self
    where
        F: Fn(&PluginDescriptor) -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        self.constructors.insert(id.to_lowercase(), Box::new(constructor));
        self
    }
}

impl PluginFactory for StaticFactory {
    fn instantiate(&self, descriptor: &PluginDescriptor) -> Result<Box<dyn Plugin>, HookError> {
        let constructor = self.constructors.get(&descriptor.id).ok_or_else(|| {
            format!(
                "no entry point registered for mod '{}' (declared at '{}')",
                descriptor.id,
                descriptor.source_path.display()
            )
        })?;
        debug!("Instantiating mod '{}' v{}", descriptor.id, descriptor.version);
        Ok(constructor(descriptor))
    }
}
