use log::{debug, info};

use crate::discovery::Discovery;
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::plugin_system::descriptor::{DescriptorSet, PluginDescriptor};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::PluginRegistry;
use crate::plugin_system::traits::PluginFactory;
use crate::plugin_system::{resolver, scheduler};
use crate::storage::config::{LoaderConfig, ModConfigStore};

/// Validated descriptors arranged in load order.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    ordered: Vec<PluginDescriptor>,
}

impl LoadPlan {
    /// Descriptors in the order their plugins are instantiated and run
    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.ordered
    }

    pub fn ids(&self) -> Vec<&str> {
        self.ordered.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Composition root: discovery, resolution, scheduling and instantiation.
pub struct Loader {
    config: LoaderConfig,
    discovery: Discovery,
}

impl Loader {
    /// Loader using the sources described by `config`.
    pub fn new(config: LoaderConfig) -> Self {
        let discovery = Discovery::from_config(&config);
        Self { config, discovery }
    }

    /// Loader with explicitly supplied sources.
    pub fn with_discovery(config: LoaderConfig, discovery: Discovery) -> Self {
        Self { config, discovery }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Store for per-mod configuration under the configured directory
    pub fn config_store(&self) -> ModConfigStore {
        ModConfigStore::new(&self.config.config_dir)
    }

    pub async fn discover(&self) -> Result<DescriptorSet> {
        info!(
            "{} v{} scanning {} ({} sources)",
            constants::APP_NAME,
            constants::APP_VERSION,
            self.config.mods_dir.display(),
            self.discovery.source_count()
        );
        Ok(self.discovery.run().await?)
    }

    /// Check every dependency, then compute the load order.
    pub fn plan(&self, descriptors: &DescriptorSet) -> Result<LoadPlan> {
        resolver::validate(descriptors)?;
        let order = scheduler::compute_order(descriptors)?;
        let ordered = order
            .iter()
            .filter_map(|id| descriptors.get(id).cloned())
            .collect();
        Ok(LoadPlan { ordered })
    }

    /// Create one plugin per planned descriptor, in order, and hand them to
    /// a registry that restores configuration from `store`.
    pub fn instantiate(
        &self,
        plan: LoadPlan,
        factory: &dyn PluginFactory,
        store: ModConfigStore,
    ) -> Result<PluginRegistry> {
        let mut plugins = Vec::with_capacity(plan.len());
        for descriptor in plan.ordered {
            let plugin = factory
                .instantiate(&descriptor)
                .map_err(|source| PluginSystemError::InstantiationFailed {
                    id: descriptor.id.clone(),
                    source,
                })?;
            debug!("Instantiated mod '{}'", descriptor.id);
            plugins.push((descriptor.id, plugin));
        }
        Ok(PluginRegistry::new(plugins).with_config_source(store))
    }
}
