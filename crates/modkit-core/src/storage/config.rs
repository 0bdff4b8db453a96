use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::kernel::constants;
use crate::storage::error::StorageSystemError;

type Result<T> = std::result::Result<T, StorageSystemError>;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    /// Every format compiled into this build, JSON first
    pub fn all() -> Vec<ConfigFormat> {
        let mut formats = vec![ConfigFormat::Json];
        #[cfg(feature = "yaml-config")]
        formats.push(ConfigFormat::Yaml);
        #[cfg(feature = "toml-config")]
        formats.push(ConfigFormat::Toml);
        formats
    }

    fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        let failed = |format: &str, source: Box<dyn std::error::Error + Send + Sync>| {
            StorageSystemError::DeserializationError {
                format: format.to_string(),
                source,
            }
        };
        match self {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| failed("JSON", Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| failed("YAML", Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| failed("TOML", Box::new(e))),
        }
    }
}

/// In-memory representation of configuration data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Raw configuration values
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from a HashMap
    pub fn from_hashmap(values: HashMap<String, serde_json::Value>) -> Self {
        Self { values }
    }

    /// Get a configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| StorageSystemError::SerializationError {
            format: "JSON".to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Remove a configuration value
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge with another config, overriding existing values
    pub fn merge(&mut self, other: &ConfigData) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        let failed = |format: &str, source: Box<dyn std::error::Error + Send + Sync>| {
            StorageSystemError::SerializationError {
                format: format.to_string(),
                source,
            }
        };
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&self).map_err(|e| failed("JSON", Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&self).map_err(|e| failed("YAML", Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&self).map_err(|e| failed("TOML", Box::new(e))),
        }
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        format.decode(data)
    }
}

/// Where persisted per-mod configuration is restored from.
pub trait ConfigSource {
    /// Configuration persisted for `id`; empty when nothing was saved.
    fn restore(&self, id: &str) -> Result<ConfigData>;
}

/// Per-mod configuration files stored as `<dir>/<id>.<ext>`.
#[derive(Debug, Clone)]
pub struct ModConfigStore {
    dir: PathBuf,
    default_format: ConfigFormat,
}

impl ModConfigStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            default_format: ConfigFormat::Json,
        }
    }

    /// Format used by [`save`](Self::save)
    pub fn with_default_format(mut self, format: ConfigFormat) -> Self {
        self.default_format = format;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The existing file for `id`, trying each compiled-in format in turn.
    fn find(&self, id: &str) -> Option<(PathBuf, ConfigFormat)> {
        ConfigFormat::all().into_iter().find_map(|format| {
            let path = self.dir.join(format!("{}.{}", id, format.extension()));
            path.is_file().then_some((path, format))
        })
    }

    /// Load the configuration saved for `id`
    pub fn load(&self, id: &str) -> Result<ConfigData> {
        let Some((path, format)) = self.find(id) else {
            debug!("No persisted configuration for mod '{}'", id);
            return Ok(ConfigData::new());
        };
        let content = fs::read_to_string(&path).map_err(|e| StorageSystemError::io(e, "read_config", path.clone()))?;
        ConfigData::deserialize(&content, format)
    }

    /// Persist the configuration for `id`, replacing any previous file.
    pub fn save(&self, id: &str, config: &ConfigData) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageSystemError::io(e, "create_dir_all", self.dir.clone()))?;
        let (path, format) = self
            .find(id)
            .unwrap_or_else(|| (self.dir.join(format!("{}.{}", id, self.default_format.extension())), self.default_format));
        let content = config.serialize(format)?;
        fs::write(&path, content).map_err(|e| StorageSystemError::io(e, "write_config", path))
    }
}

impl ConfigSource for ModConfigStore {
    fn restore(&self, id: &str) -> Result<ConfigData> {
        self.load(id)
    }
}

/// Settings for the loader itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory scanned for mods
    pub mods_dir: PathBuf,
    /// Directory holding per-mod configuration files
    pub config_dir: PathBuf,
    /// File name of standalone manifests
    pub manifest_file_name: String,
    /// Whether to look for manifests embedded in mod binaries
    pub scan_binaries: bool,
    /// Exported symbol returning an embedded manifest
    pub embedded_symbol: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            mods_dir: PathBuf::from(constants::DEFAULT_MODS_DIR),
            config_dir: PathBuf::from(constants::DEFAULT_CONFIG_DIR),
            manifest_file_name: constants::MANIFEST_FILE_NAME.to_string(),
            scan_binaries: true,
            embedded_symbol: constants::EMBEDDED_MANIFEST_SYMBOL.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Reads loader settings from a JSON, YAML or TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| StorageSystemError::UnsupportedConfigFormat(path.display().to_string()))?;
        let content = fs::read_to_string(path).map_err(|e| StorageSystemError::io(e, "read_loader_config", path.to_path_buf()))?;
        format.decode(&content)
    }
}
