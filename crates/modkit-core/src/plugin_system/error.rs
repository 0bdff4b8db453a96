//! # Modkit Plugin System Errors
//!
//! Defines error types specific to the Modkit plugin system.
//!
//! [`PluginSystemError`] covers every fatal condition the core can report:
//! malformed manifests, duplicate ids, malformed or unsatisfied dependency
//! constraints, load-order cycles, instantiation failures, and hook failures
//! raised while a lifecycle stage is being driven. Each variant carries the
//! ids, versions and stage names needed to render a precise message.
use std::path::PathBuf;

use crate::plugin_system::constraint::Requirement;
use crate::plugin_system::stage::Hook;
use crate::plugin_system::traits::HookError;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Invalid descriptor at '{}': {field}: {message}", .path.display())]
    InvalidDescriptor {
        path: PathBuf,
        field: &'static str,
        message: String,
    },

    #[error("Duplicate mod id '{id}' declared at '{}' (already declared at '{}')", .path.display(), .first_path.display())]
    DuplicateId {
        id: String,
        path: PathBuf,
        first_path: PathBuf,
    },

    #[error("Malformed dependency '{raw}' declared by mod '{owner}': {reason}")]
    DependencyParse {
        owner: String,
        raw: String,
        reason: String,
    },

    #[error("{}", unsatisfied_message(.owner, .required, .requirement))]
    UnsatisfiedDependency {
        owner: String,
        required: String,
        requirement: Requirement,
    },

    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CircularDependency { path: Vec<String> },

    #[error("Failed to instantiate mod '{id}': {source}")]
    InstantiationFailed {
        id: String,
        #[source]
        source: HookError,
    },

    #[error("Mod '{id}' failed during {stage}: {source}")]
    StageFailure {
        id: String,
        stage: Hook,
        #[source]
        source: HookError,
    },
}

fn unsatisfied_message(owner: &str, required: &str, requirement: &Requirement) -> String {
    match requirement {
        Requirement::Any => format!("Mod '{owner}' needs any version of '{required}', which is not installed"),
        Requirement::Minimum(min) => format!("Mod '{owner}' needs '{required}' version {min} or newer"),
        Requirement::Range { minimum, maximum } => format!(
            "Mod '{owner}' needs '{required}' at a version between {minimum} and {maximum}"
        ),
    }
}

impl PluginSystemError {
    /// The id of the mod the error is about, when there is one.
    pub fn mod_id(&self) -> Option<&str> {
        match self {
            PluginSystemError::DuplicateId { id, .. }
            | PluginSystemError::InstantiationFailed { id, .. }
            | PluginSystemError::StageFailure { id, .. } => Some(id.as_str()),
            PluginSystemError::DependencyParse { owner, .. }
            | PluginSystemError::UnsatisfiedDependency { owner, .. } => Some(owner.as_str()),
            _ => None,
        }
    }
}
