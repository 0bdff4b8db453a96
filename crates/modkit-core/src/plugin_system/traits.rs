use crate::plugin_system::descriptor::PluginDescriptor;
use crate::storage::config::ConfigData;

/// Error raised by a plugin hook or by a factory.
///
/// Left open so that plugins can return their own error types; the registry
/// wraps it with the plugin id and hook name.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a single hook invocation
pub type HookResult = std::result::Result<(), HookError>;

/// Context handed to [`Plugin::reload`], scoped to the plugin being reloaded.
#[derive(Debug)]
pub struct ReloadContext<'a> {
    id: &'a str,
    config: ConfigData,
}

impl<'a> ReloadContext<'a> {
    pub fn new(id: &'a str, config: ConfigData) -> Self {
        Self { id, config }
    }

    /// Id of the plugin this context belongs to
    pub fn id(&self) -> &str {
        self.id
    }

    /// Persisted configuration restored for this plugin
    pub fn config(&self) -> &ConfigData {
        &self.config
    }
}

/// Lifecycle hooks of a running mod.
///
/// Every hook defaults to doing nothing, so a plugin only implements the
/// stages it cares about. Hooks are called one plugin at a time, in load
/// order (reverse load order for [`Plugin::unload`]).
pub trait Plugin: Send {
    fn preload(&mut self) -> HookResult {
        Ok(())
    }

    fn load(&mut self) -> HookResult {
        Ok(())
    }

    fn postload(&mut self) -> HookResult {
        Ok(())
    }

    /// Called after the plugin's persisted configuration has been restored.
    fn reload(&mut self, _context: &ReloadContext<'_>) -> HookResult {
        Ok(())
    }

    fn unload(&mut self) -> HookResult {
        Ok(())
    }

    fn update(&mut self) -> HookResult {
        Ok(())
    }

    fn fixed_update(&mut self) -> HookResult {
        Ok(())
    }

    fn late_update(&mut self) -> HookResult {
        Ok(())
    }
}

/// Turns a resolved descriptor into a runnable plugin.
///
/// Implementations fail with a descriptive error when they have no entry
/// point for the descriptor.
pub trait PluginFactory {
    fn instantiate(&self, descriptor: &PluginDescriptor) -> std::result::Result<Box<dyn Plugin>, HookError>;
}

impl<F> PluginFactory for F
where
    F: Fn(&PluginDescriptor) -> std::result::Result<Box<dyn Plugin>, HookError>,
{
    fn instantiate(&self, descriptor: &PluginDescriptor) -> std::result::Result<Box<dyn Plugin>, HookError> {
        self(descriptor)
    }
}
