#![cfg(test)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::{tempdir, TempDir};

use crate::discovery::error::Result as DiscoveryResult;
use crate::discovery::{BinaryIndex, DescriptorSource, DirectorySource, Discovery};
use crate::kernel::bootstrap::Loader;
use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::factory::StaticFactory;
use crate::plugin_system::stage::Hook;
use crate::plugin_system::traits::{HookResult, Plugin, ReloadContext};
use crate::storage::config::LoaderConfig;

/// Shared record of hook calls, as `"<id>:<hook>"`.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn drain(journal: &Journal) -> Vec<String> {
    std::mem::take(&mut *journal.lock().unwrap())
}

/// A mod that logs each hook and optionally fails one of them.
pub struct TestMod {
    id: String,
    journal: Journal,
    fail_on: Option<Hook>,
}

impl TestMod {
    fn call(&self, hook: Hook) -> HookResult {
        self.journal.lock().unwrap().push(format!("{}:{}", self.id, hook));
        match self.fail_on {
            Some(failing) if failing == hook => Err(format!("{} is broken", hook).into()),
            _ => Ok(()),
        }
    }
}

impl Plugin for TestMod {
    fn preload(&mut self) -> HookResult {
        self.call(Hook::Preload)
    }

    fn load(&mut self) -> HookResult {
        self.call(Hook::Load)
    }

    fn postload(&mut self) -> HookResult {
        self.call(Hook::Postload)
    }

    fn reload(&mut self, context: &ReloadContext<'_>) -> HookResult {
        if let Some(level) = context.config().get::<String>("level") {
            self.journal.lock().unwrap().push(format!("{}:level={}", self.id, level));
        }
        self.call(Hook::Reload)
    }

    fn unload(&mut self) -> HookResult {
        self.call(Hook::Unload)
    }

    fn update(&mut self) -> HookResult {
        self.call(Hook::Update)
    }

    fn fixed_update(&mut self) -> HookResult {
        self.call(Hook::FixedUpdate)
    }

    fn late_update(&mut self) -> HookResult {
        self.call(Hook::LateUpdate)
    }
}

/// Factory producing a [`TestMod`] for each id, failing `failing` on `hook`.
pub fn test_factory(ids: &[&str], journal: &Journal, failing: Option<(&str, Hook)>) -> StaticFactory {
    let mut factory = StaticFactory::new();
    for id in ids {
        let journal = journal.clone();
        let fail_on = failing.filter(|(failing_id, _)| failing_id == id).map(|(_, hook)| hook);
        factory.register(id, move |descriptor: &PluginDescriptor| {
            Box::new(TestMod {
                id: descriptor.id.clone(),
                journal: journal.clone(),
                fail_on,
            }) as Box<dyn Plugin>
        });
    }
    factory
}

/// Stand-in for manifests embedded in binaries.
pub struct PackedSource(pub Vec<PluginDescriptor>);

#[async_trait]
impl DescriptorSource for PackedSource {
    fn name(&self) -> &str {
        "packed"
    }

    async fn discover(&self, index: &mut BinaryIndex) -> DiscoveryResult<Vec<PluginDescriptor>> {
        for descriptor in &self.0 {
            index.record(&descriptor.source_path, &descriptor.id);
        }
        Ok(self.0.clone())
    }
}

/// A scratch game directory with `mods/` and `config/`.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        fs::create_dir_all(dir.path().join("mods")).expect("Failed to create mods directory");
        Self { dir }
    }

    pub fn mods_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("mods")
    }

    pub fn with_manifest(self, id: &str, json: &str) -> Self {
        write_manifest(&self.mods_dir(), id, json);
        self
    }

    pub fn config(&self) -> LoaderConfig {
        LoaderConfig {
            mods_dir: self.mods_dir(),
            config_dir: self.dir.path().join("config"),
            scan_binaries: false,
            ..LoaderConfig::default()
        }
    }

    pub fn loader(&self) -> Loader {
        Loader::new(self.config())
    }

    /// Loader reading manifest files plus the given packed descriptors
    pub fn loader_with_packed(&self, packed: Vec<PluginDescriptor>) -> Loader {
        let config = self.config();
        let discovery = Discovery::new()
            .with_source(DirectorySource::new(&config.mods_dir, &config.manifest_file_name))
            .with_source(PackedSource(packed));
        Loader::with_discovery(config, discovery)
    }
}

pub fn write_manifest(mods_dir: &Path, id: &str, json: &str) {
    let dir = mods_dir.join(id);
    fs::create_dir_all(&dir).expect("Failed to create mod directory");
    fs::write(dir.join("mod.json"), json).expect("Failed to write manifest");
}
