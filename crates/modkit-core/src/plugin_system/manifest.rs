use serde::{Deserialize, Serialize};

/// Raw manifest record as declared by a mod, before validation.
///
/// Every field is optional at this level; [`PluginDescriptor::from_record`]
/// decides which omissions are fatal and which fall back to defaults.
///
/// [`PluginDescriptor::from_record`]: crate::plugin_system::descriptor::PluginDescriptor::from_record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Mods flagged `nosave` must not be relied upon by save games.
    #[serde(default)]
    pub nosave: bool,
    /// Raw constraint strings: `"id"`, `"id min"` or `"id min max"`.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub load_after: Option<Vec<String>>,
    #[serde(default)]
    pub load_before: Option<Vec<String>>,
}

impl ManifestRecord {
    /// Parses a manifest record from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Create a record carrying only an id
    pub fn with_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }
}
