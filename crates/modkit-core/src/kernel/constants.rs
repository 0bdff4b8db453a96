/// Application name
pub const APP_NAME: &str = "modkit";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory scanned for mods
pub const DEFAULT_MODS_DIR: &str = "mods";

/// Default directory for per-mod configuration files
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// File name of a standalone mod manifest
pub const MANIFEST_FILE_NAME: &str = "mod.json";

/// Symbol a mod binary exports to embed its manifest.
///
/// Expected signature: `extern "C" fn() -> *const c_char`, returning a
/// NUL-terminated UTF-8 JSON manifest with static lifetime.
pub const EMBEDDED_MANIFEST_SYMBOL: &str = "modkit_manifest";

/// File extensions treated as mod binaries
pub const LIBRARY_EXTENSIONS: &[&str] = &["so", "dll", "dylib"];
