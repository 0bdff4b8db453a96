use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::version::{Version, VersionError};

/// The three shapes a dependency declaration can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// `"id"`: any version.
    None,
    /// `"id min"`: at least `min`.
    Minimum,
    /// `"id min max"`: between `min` and `max`, both inclusive.
    Maximum,
}

/// Version bounds attached to a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Requirement {
    Any,
    Minimum(Version),
    Range { minimum: Version, maximum: Version },
}

impl Requirement {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Requirement::Any => ConstraintKind::None,
            Requirement::Minimum(_) => ConstraintKind::Minimum,
            Requirement::Range { .. } => ConstraintKind::Maximum,
        }
    }

    pub fn minimum(&self) -> Option<Version> {
        match self {
            Requirement::Any => None,
            Requirement::Minimum(min) | Requirement::Range { minimum: min, .. } => Some(*min),
        }
    }

    pub fn maximum(&self) -> Option<Version> {
        match self {
            Requirement::Range { maximum, .. } => Some(*maximum),
            _ => None,
        }
    }

    /// Check whether `version` falls inside the bounds
    pub fn accepts(&self, version: &Version) -> bool {
        match self {
            Requirement::Any => true,
            Requirement::Minimum(min) => version >= min,
            Requirement::Range { minimum, maximum } => version >= minimum && version <= maximum,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Any => write!(f, "any version"),
            Requirement::Minimum(min) => write!(f, ">= {}", min),
            Requirement::Range { minimum, maximum } => write!(f, "{} - {}", minimum, maximum),
        }
    }
}

/// Error that can occur when parsing a raw dependency string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("expected 1 to 3 whitespace-separated tokens, found {0}")]
    TokenCount(usize),

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// A parsed dependency on another mod
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Constraint {
    /// Lowercased id of the required mod
    pub required_id: String,

    /// The versions that are acceptable
    pub requirement: Requirement,
}

impl Constraint {
    /// Create a dependency on any version of `id`
    pub fn any(id: &str) -> Self {
        Self {
            required_id: id.to_lowercase(),
            requirement: Requirement::Any,
        }
    }

    /// Create a dependency on `id` at `minimum` or newer
    pub fn at_least(id: &str, minimum: Version) -> Self {
        Self {
            required_id: id.to_lowercase(),
            requirement: Requirement::Minimum(minimum),
        }
    }

    /// Create a dependency on `id` within an inclusive range
    pub fn between(id: &str, minimum: Version, maximum: Version) -> Self {
        Self {
            required_id: id.to_lowercase(),
            requirement: Requirement::Range { minimum, maximum },
        }
    }

    /// Parses `"id"`, `"id min"` or `"id min max"`.
    pub fn parse(raw: &str) -> Result<Self, ConstraintError> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        match tokens.as_slice() {
            [id] => Ok(Self::any(id)),
            [id, min] => Ok(Self::at_least(id, Version::parse(min)?)),
            [id, min, max] => Ok(Self::between(id, Version::parse(min)?, Version::parse(max)?)),
            other => Err(ConstraintError::TokenCount(other.len())),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.requirement.kind()
    }

    /// Whether `candidate` is the required mod at an acceptable version.
    pub fn is_satisfied_by(&self, candidate: &PluginDescriptor) -> bool {
        candidate.id == self.required_id && self.requirement.accepts(&candidate.version)
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Constraint::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requirement {
            Requirement::Any => write!(f, "{}", self.required_id),
            Requirement::Minimum(min) => write!(f, "{} {}", self.required_id, min),
            Requirement::Range { minimum, maximum } => {
                write!(f, "{} {} {}", self.required_id, minimum, maximum)
            }
        }
    }
}
