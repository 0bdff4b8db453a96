use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::fs;

use crate::discovery::error::{DiscoveryError, Result};
use crate::discovery::index::BinaryIndex;
use crate::discovery::DescriptorSource;
use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::manifest::ManifestRecord;

type FileFilter<'a> = &'a (dyn Fn(&Path) -> bool + Send + Sync);

/// Every file under `root` accepted by `filter`, in ascending path order.
///
/// A missing root yields no files. The root itself must be readable;
/// unreadable subdirectories are logged and skipped.
pub(crate) async fn find_files(root: &Path, filter: FileFilter<'_>) -> Result<Vec<PathBuf>> {
    let exists = fs::try_exists(root)
        .await
        .map_err(|e| DiscoveryError::io(e, "try_exists", root.to_path_buf()))?;
    if !exists {
        debug!("Mods directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    scan_boxed(root.to_path_buf(), filter, &mut found).await?;
    found.sort();
    Ok(found)
}

fn scan_boxed<'a>(
    dir: PathBuf,
    filter: FileFilter<'a>,
    found: &'a mut Vec<PathBuf>,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(scan_inner(dir, filter, found))
}

async fn scan_inner(dir: PathBuf, filter: FileFilter<'_>, found: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(&dir)
        .await
        .map_err(|e| DiscoveryError::io(e, "read_dir", dir.clone()))?;

    let mut subdirs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DiscoveryError::io(e, "next_entry", dir.clone()))?
    {
        let path = entry.path();
        let metadata = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        if metadata.is_dir() {
            subdirs.push(path);
        } else if metadata.is_file() && filter(&path) {
            found.push(path);
        }
    }

    subdirs.sort();
    for subdir in subdirs {
        if let Err(e) = scan_boxed(subdir.clone(), filter, found).await {
            warn!("Skipping unreadable directory {}: {}", subdir.display(), e);
        }
    }
    Ok(())
}

/// Standalone manifest files found anywhere under a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    file_name: String,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P, file_name: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            file_name: file_name.to_string(),
        }
    }

    async fn load_manifest(&self, path: &Path) -> Result<PluginDescriptor> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DiscoveryError::io(e, "read_manifest", path.to_path_buf()))?;
        let record = ManifestRecord::from_json(&content).map_err(|source| DiscoveryError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PluginDescriptor::from_record(record, path, true)?)
    }
}

#[async_trait]
impl DescriptorSource for DirectorySource {
    fn name(&self) -> &str {
        "manifest files"
    }

    async fn discover(&self, _index: &mut BinaryIndex) -> Result<Vec<PluginDescriptor>> {
        let file_name = self.file_name.as_str();
        let is_manifest = move |path: &Path| path.file_name().is_some_and(|name| name == file_name);
        let paths = find_files(&self.root, &is_manifest).await?;

        let mut descriptors = Vec::with_capacity(paths.len());
        for path in paths {
            let descriptor = self.load_manifest(&path).await?;
            debug!("Found manifest for '{}' at {}", descriptor.id, path.display());
            descriptors.push(descriptor);
        }
        Ok(descriptors)
    }
}
