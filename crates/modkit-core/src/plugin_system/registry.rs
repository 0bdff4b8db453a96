use log::{error, info};

use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::stage::{Hook, LifecycleStage};
use crate::plugin_system::traits::{HookError, HookResult, Plugin, ReloadContext};
use crate::storage::config::{ConfigData, ConfigSource};

type Result<T> = std::result::Result<T, PluginSystemError>;

/// Ordered plugin instances and the lifecycle stage they are in.
///
/// The order is fixed at construction (it is the computed load order) and
/// is the only order hooks ever run in; unload runs it backwards. The
/// current stage is changed only by the `run_*` methods.
pub struct PluginRegistry {
    plugins: Vec<(String, Box<dyn Plugin>)>,
    stage: Option<LifecycleStage>,
    config_source: Option<Box<dyn ConfigSource>>,
}

impl PluginRegistry {
    /// Create a registry over instances already arranged in load order
    pub fn new(plugins: Vec<(String, Box<dyn Plugin>)>) -> Self {
        Self {
            plugins,
            stage: None,
            config_source: None,
        }
    }

    /// Source of persisted configuration restored before each reload hook
    pub fn with_config_source<C: ConfigSource + 'static>(mut self, source: C) -> Self {
        self.config_source = Some(Box::new(source));
        self
    }

    /// Stage entered most recently, `None` before [`run_preload`](Self::run_preload).
    pub fn current_stage(&self) -> Option<LifecycleStage> {
        self.stage
    }

    /// Plugin ids in load order
    pub fn ids(&self) -> Vec<&str> {
        self.plugins.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.iter().any(|(existing, _)| existing == id)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn run_preload(&mut self) -> Result<()> {
        self.enter(LifecycleStage::Preload);
        self.run_forward(Hook::Preload, |plugin| plugin.preload())
    }

    pub fn run_load(&mut self) -> Result<()> {
        self.enter(LifecycleStage::Load);
        self.run_forward(Hook::Load, |plugin| plugin.load())
    }

    /// Runs postload and, once every plugin has succeeded, enters `Finished`.
    pub fn run_postload(&mut self) -> Result<()> {
        self.enter(LifecycleStage::Postload);
        self.run_forward(Hook::Postload, |plugin| plugin.postload())?;
        self.enter(LifecycleStage::Finished);
        Ok(())
    }

    /// Restores each plugin's persisted configuration, then calls its
    /// reload hook. Returns to `Finished` when every plugin has reloaded.
    pub fn run_reload(&mut self) -> Result<()> {
        self.enter(LifecycleStage::Reload);
        for (id, plugin) in self.plugins.iter_mut() {
            let config = match &self.config_source {
                Some(source) => source.restore(id).map_err(|e| {
                    error!("Failed to restore configuration for mod '{}': {}", id, e);
                    PluginSystemError::StageFailure {
                        id: id.clone(),
                        stage: Hook::Reload,
                        source: Box::new(e),
                    }
                })?,
                None => ConfigData::new(),
            };
            let context = ReloadContext::new(id, config);
            plugin
                .reload(&context)
                .map_err(|source| stage_failure(id, Hook::Reload, source))?;
        }
        self.enter(LifecycleStage::Finished);
        Ok(())
    }

    /// Calls every unload hook in reverse load order.
    pub fn run_unload(&mut self) -> Result<()> {
        self.enter(LifecycleStage::Unload);
        for (id, plugin) in self.plugins.iter_mut().rev() {
            plugin
                .unload()
                .map_err(|source| stage_failure(id, Hook::Unload, source))?;
        }
        Ok(())
    }

    pub fn run_update(&mut self) -> Result<()> {
        self.run_frame(Hook::Update, |plugin| plugin.update())
    }

    pub fn run_fixed_update(&mut self) -> Result<()> {
        self.run_frame(Hook::FixedUpdate, |plugin| plugin.fixed_update())
    }

    pub fn run_late_update(&mut self) -> Result<()> {
        self.run_frame(Hook::LateUpdate, |plugin| plugin.late_update())
    }

    /// Frame hooks only run once the boot path has finished.
    fn run_frame(&mut self, hook: Hook, call: fn(&mut dyn Plugin) -> HookResult) -> Result<()> {
        if self.stage != Some(LifecycleStage::Finished) {
            return Ok(());
        }
        self.run_forward(hook, call)
    }

    fn run_forward(&mut self, hook: Hook, call: fn(&mut dyn Plugin) -> HookResult) -> Result<()> {
        for (id, plugin) in self.plugins.iter_mut() {
            call(plugin.as_mut()).map_err(|source| stage_failure(id, hook, source))?;
        }
        Ok(())
    }

    fn enter(&mut self, stage: LifecycleStage) {
        if self.stage != Some(stage) {
            info!("Entering {} stage ({} mods)", stage, self.plugins.len());
        }
        self.stage = Some(stage);
    }
}

fn stage_failure(id: &str, stage: Hook, source: HookError) -> PluginSystemError {
    error!("Mod '{}' failed during {}: {}", id, stage, source);
    PluginSystemError::StageFailure {
        id: id.to_string(),
        stage,
        source,
    }
}
