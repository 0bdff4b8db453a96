use std::ffi::{CStr, c_char};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use libloading::{Library, Symbol};
use log::{debug, info};

use crate::discovery::directory::find_files;
use crate::discovery::error::{DiscoveryError, Result};
use crate::discovery::index::BinaryIndex;
use crate::discovery::DescriptorSource;
use crate::kernel::constants::LIBRARY_EXTENSIONS;
use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::manifest::ManifestRecord;

/// Signature of the exported manifest accessor.
type ManifestFn = unsafe extern "C" fn() -> *const c_char;

/// Manifests embedded in mod binaries.
///
/// Every dynamic library under the root is opened and asked for its
/// manifest through an exported accessor. A library that does not export
/// the accessor is not a mod and is skipped. A file with a library
/// extension that cannot be opened is an error.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    root: PathBuf,
    symbol: String,
}

impl EmbeddedSource {
    pub fn new<P: AsRef<Path>>(root: P, symbol: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            symbol: symbol.to_string(),
        }
    }

    pub fn is_library(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| LIBRARY_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
    }

    /// The manifest JSON exported by `path`, or `None` when the library
    /// has no accessor.
    fn read_manifest(&self, path: &Path) -> Result<Option<String>> {
        // SAFETY: loading a library runs its initializers. Mod binaries in the
        // mods directory are trusted to the same degree as the host.
        let library = unsafe { Library::new(path) }.map_err(|source| DiscoveryError::Library {
            path: path.to_path_buf(),
            source,
        })?;

        let mut symbol_name = self.symbol.clone().into_bytes();
        symbol_name.push(0);

        // SAFETY: the accessor is declared with `ManifestFn`'s signature.
        let accessor: Symbol<ManifestFn> = match unsafe { library.get(&symbol_name) } {
            Ok(accessor) => accessor,
            Err(e) => {
                debug!("{} does not export '{}': {}", path.display(), self.symbol, e);
                return Ok(None);
            }
        };

        let invalid = |message: String| DiscoveryError::EmbeddedManifest {
            path: path.to_path_buf(),
            message,
        };

        // SAFETY: the accessor returns a pointer to a static NUL-terminated string.
        let ptr = unsafe { accessor() };
        if ptr.is_null() {
            return Err(invalid(format!("'{}' returned a null pointer", self.symbol)));
        }
        // SAFETY: non-null and owned by the still-loaded library.
        let text = unsafe { CStr::from_ptr(ptr) }
            .to_str()
            .map_err(|e| invalid(format!("manifest is not valid UTF-8: {}", e)))?
            .to_owned();
        Ok(Some(text))
    }
}

#[async_trait]
impl DescriptorSource for EmbeddedSource {
    fn name(&self) -> &str {
        "embedded manifests"
    }

    async fn discover(&self, index: &mut BinaryIndex) -> Result<Vec<PluginDescriptor>> {
        let paths = find_files(&self.root, &Self::is_library).await?;

        let mut descriptors = Vec::new();
        for path in paths {
            if index.contains(&path) {
                continue;
            }
            let Some(json) = self.read_manifest(&path)? else {
                continue;
            };
            let record = ManifestRecord::from_json(&json).map_err(|source| DiscoveryError::Manifest {
                path: path.clone(),
                source,
            })?;
            let descriptor = PluginDescriptor::from_record(record, &path, false)?;
            info!("Found embedded manifest for '{}' in {}", descriptor.id, path.display());
            index.record(&path, &descriptor.id);
            descriptors.push(descriptor);
        }
        Ok(descriptors)
    }
}
