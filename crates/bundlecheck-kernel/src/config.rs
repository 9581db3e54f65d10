//! Harness configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) describes a standard bundle:
//!
//! ```toml
//! app_name = "kitty"
//! bundle_root = "/opt/kitty"
//! required_plugins = ["diff", "hints"]
//! min_plugins = 8
//!
//! [[extensions]]
//! name = "fast_data_types"
//! path = "fast_data_types.so"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::paths;

/// Plugin count must be strictly greater than this.
pub const DEFAULT_MIN_PLUGINS: usize = 8;

/// Root certificate count must be strictly greater than this.
pub const DEFAULT_MIN_TRUST_ROOTS: usize = 2;

const DEFAULT_SHADERS: &[&str] = &["cell", "border", "bgimage", "tint", "blit", "graphics"];

const DEFAULT_EXTENSIONS: &[(&str, &str)] = &[
    ("fast_data_types", "fast_data_types.so"),
    ("subseq_matcher", "kittens/choose/subseq_matcher.so"),
    ("diff_speedup", "kittens/diff/diff_speedup.so"),
    ("rsync", "kittens/transfer/rsync.so"),
    ("unicode_names", "kittens/unicode_input/unicode_names.so"),
];

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {}: extension module {name} declared more than once", path.display())]
    DuplicateExtension { path: PathBuf, name: String },
}

/// A native extension module the bundle must be able to load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionSpec {
    /// Module name used in reports.
    pub name: String,
    /// Path of the shared object, relative to the package directory.
    pub path: PathBuf,
    /// Symbol that must resolve once the module is loaded.
    #[serde(default)]
    pub init_symbol: Option<String>,
}

impl ExtensionSpec {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            init_symbol: None,
        }
    }
}

/// Everything the harness needs to know about the bundle under test.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Application name; drives executable and data file names.
    pub app_name: String,
    /// Bundle root (install prefix on Linux, the `.app` on macOS).
    pub bundle_root: PathBuf,
    /// Executable path relative to the bundle root, replacing the platform default.
    pub executable: Option<PathBuf>,
    /// Treat the bundle as a frozen, distributable build.
    pub frozen: bool,
    pub required_plugins: Vec<String>,
    pub min_plugins: usize,
    pub min_trust_roots: usize,
    pub shaders: Vec<String>,
    pub extensions: Vec<ExtensionSpec>,
    /// File whose presence marks a plugin directory.
    pub plugin_entry: String,
    /// Trust store bundle, overriding the one inside the package directory.
    pub trust_store: Option<PathBuf>,
    /// Count the platform trust store instead of a bundled one.
    pub platform_trust_store: bool,
    /// Directory name of the bundled highlighting engine.
    pub highlight_engine: String,
    /// File inside the highlighting engine that must be present.
    pub highlight_entry: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            app_name: "kitty".to_string(),
            bundle_root: PathBuf::from("."),
            executable: None,
            frozen: false,
            required_plugins: vec!["diff".to_string(), "hints".to_string()],
            min_plugins: DEFAULT_MIN_PLUGINS,
            min_trust_roots: DEFAULT_MIN_TRUST_ROOTS,
            shaders: DEFAULT_SHADERS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|(name, path)| ExtensionSpec::new(*name, *path))
                .collect(),
            plugin_entry: "main.py".to_string(),
            trust_store: None,
            platform_trust_store: false,
            highlight_engine: "pygments".to_string(),
            highlight_entry: "__init__.py".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `$BUNDLECHECK_CONFIG` is tried,
    /// then the XDG config file; if neither is present the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(paths::CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        let default = paths::config_file();
        if default.is_file() {
            return Self::load_from(&default);
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(name) = config.duplicate_extension() {
            return Err(ConfigError::DuplicateExtension {
                path: path.to_path_buf(),
                name: name.to_string(),
            });
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// First extension name declared twice; modules are reported by name.
    pub fn duplicate_extension(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.extensions
            .iter()
            .map(|m| m.name.as_str())
            .find(|name| !seen.insert(*name))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
