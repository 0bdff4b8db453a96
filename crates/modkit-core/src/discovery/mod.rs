//! # Modkit Discovery
//!
//! Finds mod manifests on disk and turns them into a
//! [`DescriptorSet`](crate::plugin_system::DescriptorSet).
//!
//! Manifests come from two places that share one id namespace:
//!
//! - **[`directory`]**: standalone manifest files (`mod.json` by default)
//!   anywhere under the mods directory.
//! - **[`embedded`]**: manifests exported by mod binaries through a
//!   well-known symbol.
//!
//! [`Discovery::run`] drives every configured [`DescriptorSource`] while
//! holding the [`IndexScope`] for the pass, and rejects an id declared by
//! more than one manifest.
pub mod directory;
pub mod embedded;
pub mod error;
pub mod index;

use async_trait::async_trait;
use log::{debug, info};

pub use directory::DirectorySource;
pub use embedded::EmbeddedSource;
pub use error::{DiscoveryError, Result};
pub use index::{BinaryIndex, IndexScope};

use crate::plugin_system::descriptor::{DescriptorSet, PluginDescriptor};
use crate::storage::config::LoaderConfig;

/// Somewhere descriptors can be discovered from.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    /// Human readable name used in log output
    fn name(&self) -> &str;

    /// Every descriptor this source can see, in a stable order.
    async fn discover(&self, index: &mut BinaryIndex) -> Result<Vec<PluginDescriptor>>;
}

/// Ordered list of descriptor sources merged into one set.
#[derive(Default)]
pub struct Discovery {
    sources: Vec<Box<dyn DescriptorSource>>,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources for a loader configuration: manifest files, then mod
    /// binaries when `scan_binaries` is set.
    pub fn from_config(config: &LoaderConfig) -> Self {
        let mut discovery = Self::new().with_source(DirectorySource::new(&config.mods_dir, &config.manifest_file_name));
        if config.scan_binaries {
            discovery = discovery.with_source(EmbeddedSource::new(&config.mods_dir, &config.embedded_symbol));
        }
        discovery
    }

    pub fn with_source<S: DescriptorSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run every source in order and merge the results.
    ///
    /// Fails with [`DuplicateId`](crate::plugin_system::PluginSystemError::DuplicateId)
    /// naming the later manifest when an id is seen twice.
    pub async fn run(&self) -> Result<DescriptorSet> {
        let mut scope = IndexScope::acquire();
        let mut descriptors = DescriptorSet::new();

        for source in &self.sources {
            let found = source.discover(&mut scope).await?;
            info!("Discovered {} mods from {}", found.len(), source.name());
            for descriptor in found {
                descriptors.insert(descriptor)?;
            }
        }

        for (binary, ids) in scope.entries() {
            debug!("{} declares [{}]", binary.display(), ids.join(", "));
        }
        info!("Discovered {} mods ({} mod binaries indexed)", descriptors.len(), scope.len());

        Ok(descriptors)
    }
}
