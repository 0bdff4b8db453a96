use std::fmt;

/// Lifecycle stage the registry is currently driving.
///
/// The normal boot path is `Preload -> Load -> Postload -> Finished`.
/// `Reload` may run any number of times once `Finished`; `Unload` runs once
/// at teardown and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStage {
    Preload,
    Load,
    Postload,
    Reload,
    Unload,
    Finished,
}

impl LifecycleStage {
    /// Stable lowercase name used in messages and logs
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleStage::Preload => "preload",
            LifecycleStage::Load => "load",
            LifecycleStage::Postload => "postload",
            LifecycleStage::Reload => "reload",
            LifecycleStage::Unload => "unload",
            LifecycleStage::Finished => "finished",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single plugin hook invoked by the registry.
///
/// Failures are reported against the hook, so an error raised from
/// `fixed_update` names that hook rather than the surrounding stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    Preload,
    Load,
    Postload,
    Reload,
    Unload,
    Update,
    FixedUpdate,
    LateUpdate,
}

impl Hook {
    pub fn name(&self) -> &'static str {
        match self {
            Hook::Preload => "preload",
            Hook::Load => "load",
            Hook::Postload => "postload",
            Hook::Reload => "reload",
            Hook::Unload => "unload",
            Hook::Update => "update",
            Hook::FixedUpdate => "fixed_update",
            Hook::LateUpdate => "late_update",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
