use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::plugin_system::constraint::Constraint;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::manifest::ManifestRecord;
use crate::plugin_system::version::Version;

/// Validated identity, metadata and ordering declarations of one mod.
///
/// Two descriptors are equal when their ids are equal.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    /// Lowercased, whitespace-free identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    pub author: String,

    pub description: String,

    pub version: Version,

    /// False when the manifest declared `nosave`
    pub allow_saves: bool,

    /// Raw constraint strings, in declaration order
    pub dependencies: Vec<String>,

    /// Ids this mod must load after
    pub load_after: BTreeSet<String>,

    /// Ids this mod must load before
    pub load_before: BTreeSet<String>,

    /// Where the manifest was read from
    pub source_path: PathBuf,

    /// True for standalone manifest files, false for manifests embedded in a binary
    pub is_from_manifest_file: bool,
}

impl PluginDescriptor {
    /// Create a descriptor with defaults for everything but the id.
    /// The id is lowercased; use [`PluginDescriptor::from_record`] when it
    /// needs validating.
    pub fn new(id: &str) -> Self {
        let id = id.to_lowercase();
        Self {
            name: id.clone(),
            id,
            author: String::new(),
            description: String::new(),
            version: Version::DEFAULT,
            allow_saves: true,
            dependencies: Vec::new(),
            load_after: BTreeSet::new(),
            load_before: BTreeSet::new(),
            source_path: PathBuf::new(),
            is_from_manifest_file: true,
        }
    }

    /// Validates a raw manifest record.
    ///
    /// Checks, in order: the id is present and non-empty, lowercases it,
    /// rejects ids containing whitespace, defaults the ordering sets, then
    /// parses the version (defaulting to [`Version::DEFAULT`]).
    pub fn from_record(
        record: ManifestRecord,
        source_path: &Path,
        is_from_manifest_file: bool,
    ) -> Result<Self, PluginSystemError> {
        let invalid = |field: &'static str, message: String| PluginSystemError::InvalidDescriptor {
            path: source_path.to_path_buf(),
            field,
            message,
        };

        let id = match record.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_lowercase(),
            _ => return Err(invalid("id", "missing id".to_string())),
        };
        if id.chars().any(char::is_whitespace) {
            return Err(invalid("id", format!("invalid id '{}': must not contain whitespace", id)));
        }

        let normalize = |ids: Option<Vec<String>>| -> BTreeSet<String> {
            ids.unwrap_or_default()
                .iter()
                .map(|other| other.trim().to_lowercase())
                .filter(|other| !other.is_empty())
                .collect()
        };
        let load_after = normalize(record.load_after);
        let load_before = normalize(record.load_before);

        let version = match record.version.as_deref() {
            Some(text) => Version::parse(text).map_err(|e| invalid("version", e.to_string()))?,
            None => Version::DEFAULT,
        };

        Ok(Self {
            name: record.name.unwrap_or_else(|| id.clone()),
            author: record.author.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            version,
            allow_saves: !record.nosave,
            dependencies: record.dependencies,
            load_after,
            load_before,
            source_path: source_path.to_path_buf(),
            is_from_manifest_file,
            id,
        })
    }

    /// Parses every declared dependency string.
    pub fn constraints(&self) -> Result<Vec<Constraint>, PluginSystemError> {
        self.dependencies
            .iter()
            .map(|raw| {
                Constraint::parse(raw).map_err(|e| PluginSystemError::DependencyParse {
                    owner: self.id.clone(),
                    raw: raw.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

impl PartialEq for PluginDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PluginDescriptor {}

impl Hash for PluginDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Builder for creating a descriptor in code
pub struct DescriptorBuilder {
    descriptor: PluginDescriptor,
}

impl DescriptorBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            descriptor: PluginDescriptor::new(id),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.descriptor.name = name.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.descriptor.author = author.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.descriptor.description = description.to_string();
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.descriptor.version = version;
        self
    }

    pub fn nosave(mut self) -> Self {
        self.descriptor.allow_saves = false;
        self
    }

    /// Add a raw dependency string
    pub fn dependency(mut self, raw: &str) -> Self {
        self.descriptor.dependencies.push(raw.to_string());
        self
    }

    pub fn load_after(mut self, id: &str) -> Self {
        self.descriptor.load_after.insert(id.to_lowercase());
        self
    }

    pub fn load_before(mut self, id: &str) -> Self {
        self.descriptor.load_before.insert(id.to_lowercase());
        self
    }

    pub fn source_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.descriptor.source_path = path.as_ref().to_path_buf();
        self
    }

    /// Mark the descriptor as read from a manifest embedded in a binary
    pub fn embedded(mut self) -> Self {
        self.descriptor.is_from_manifest_file = false;
        self
    }

    pub fn build(self) -> PluginDescriptor {
        self.descriptor
    }
}

/// A set of descriptors with unique ids, iterated in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSet {
    descriptors: BTreeMap<String, PluginDescriptor>,
}

impl DescriptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set, failing on the first repeated id.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, PluginSystemError>
    where
        I: IntoIterator<Item = PluginDescriptor>,
    {
        let mut set = Self::new();
        for descriptor in descriptors {
            set.insert(descriptor)?;
        }
        Ok(set)
    }

    /// Adds a descriptor, rejecting an id that is already present.
    pub fn insert(&mut self, descriptor: PluginDescriptor) -> Result<(), PluginSystemError> {
        if let Some(existing) = self.descriptors.get(&descriptor.id) {
            return Err(PluginSystemError::DuplicateId {
                id: descriptor.id,
                path: descriptor.source_path,
                first_path: existing.source_path.clone(),
            });
        }
        self.descriptors.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PluginDescriptor> {
        self.descriptors.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.descriptors.contains_key(id)
    }

    /// Descriptors in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.descriptors.values()
    }

    /// Ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a DescriptorSet {
    type Item = &'a PluginDescriptor;
    type IntoIter = std::collections::btree_map::Values<'a, String, PluginDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.values()
    }
}
