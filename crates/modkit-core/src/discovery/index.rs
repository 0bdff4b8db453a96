use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use log::debug;

/// Binaries seen during one discovery pass and the mod ids each declared.
#[derive(Debug, Default)]
pub struct BinaryIndex {
    entries: BTreeMap<PathBuf, Vec<String>>,
}

impl BinaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `binary` declares `id`.
    pub fn record(&mut self, binary: &Path, id: &str) {
        self.entries
            .entry(binary.to_path_buf())
            .or_default()
            .push(id.to_string());
    }

    /// Whether `binary` has already been inspected in this pass.
    pub fn contains(&self, binary: &Path) -> bool {
        self.entries.contains_key(binary)
    }

    /// Every indexed binary with the ids it declared, ordered by path
    pub fn entries(&self) -> impl Iterator<Item = (&Path, &[String])> {
        self.entries.iter().map(|(binary, ids)| (binary.as_path(), ids.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Guard over the [`BinaryIndex`] for the duration of a discovery pass.
///
/// The index is cleared when the guard is dropped, whether discovery
/// succeeded or returned early with an error.
#[derive(Debug)]
pub struct IndexScope {
    index: BinaryIndex,
}

impl IndexScope {
    pub fn acquire() -> Self {
        debug!("Acquired binary index");
        Self {
            index: BinaryIndex::new(),
        }
    }
}

impl Deref for IndexScope {
    type Target = BinaryIndex;

    fn deref(&self) -> &BinaryIndex {
        &self.index
    }
}

impl DerefMut for IndexScope {
    fn deref_mut(&mut self) -> &mut BinaryIndex {
        &mut self.index
    }
}

impl Drop for IndexScope {
    fn drop(&mut self) {
        debug!("Releasing binary index ({} binaries)", self.index.len());
        self.index.clear();
    }
}
