use log::info;
use modkit_core::plugin_system::{
    Hook, HookError, HookResult, Plugin, PluginDescriptor, PluginFactory, ReloadContext,
};

/// A stand-in mod that reports every hook it receives.
///
/// Used by `modkit boot` to rehearse the lifecycle of a mods directory
/// without running any mod code.
#[derive(Debug)]
pub struct TracingPlugin {
    id: String,
}

impl TracingPlugin {
    fn trace(&self, hook: Hook) -> HookResult {
        info!("Mod '{}' received {}", self.id, hook);
        println!("  {} {}", hook, self.id);
        Ok(())
    }
}

impl Plugin for TracingPlugin {
    fn preload(&mut self) -> HookResult {
        self.trace(Hook::Preload)
    }

    fn load(&mut self) -> HookResult {
        self.trace(Hook::Load)
    }

    fn postload(&mut self) -> HookResult {
        self.trace(Hook::Postload)
    }

    fn reload(&mut self, _context: &ReloadContext<'_>) -> HookResult {
        self.trace(Hook::Reload)
    }

    fn unload(&mut self) -> HookResult {
        self.trace(Hook::Unload)
    }

    fn update(&mut self) -> HookResult {
        self.trace(Hook::Update)
    }

    fn fixed_update(&mut self) -> HookResult {
        self.trace(Hook::FixedUpdate)
    }

    fn late_update(&mut self) -> HookResult {
        self.trace(Hook::LateUpdate)
    }
}

/// Instantiates a [`TracingPlugin`] for every descriptor.
#[derive(Debug, Default)]
pub struct TracingFactory;

impl PluginFactory for TracingFactory {
    fn instantiate(&self, descriptor: &PluginDescriptor) -> Result<Box<dyn Plugin>, HookError> {
        Ok(Box::new(TracingPlugin {
            id: descriptor.id.clone(),
        }))
    }
}
