//! Plugin ("kitten") registry for enumerating and looking up sub-tools.

use std::collections::BTreeSet;
use std::path::PathBuf;

use bundlecheck_types::LoadError;

use crate::Loadable;

/// Something that can enumerate registered plugin names.
pub trait PluginSource {
    fn plugin_names(&self) -> Result<Vec<String>, LoadError>;
}

/// Registry of available plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRegistry {
    names: BTreeSet<String>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from everything a source enumerates.
    pub fn from_source(source: &dyn PluginSource) -> Result<Self, LoadError> {
        let mut registry = Self::new();
        for name in source.plugin_names()? {
            registry.register(name);
        }
        Ok(registry)
    }

    /// Register a plugin.
    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Check if a plugin exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// List all plugin names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.names.iter().map(|s| s.as_str()).collect()
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Loadable for PluginRegistry {
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(LoadError::Unresolvable(format!("plugin {name} is not registered")))
        }
    }

    fn describe(&self, name: &str) -> String {
        format!("{name} registered")
    }
}

/// Discovers plugins as sub-directories of the plugin dir holding an entry file.
#[derive(Debug, Clone)]
pub struct DirectoryPluginSource {
    dir: PathBuf,
    entry_file: String,
}

impl DirectoryPluginSource {
    pub fn new(dir: impl Into<PathBuf>, entry_file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            entry_file: entry_file.into(),
        }
    }
}

impl PluginSource for DirectoryPluginSource {
    fn plugin_names(&self) -> Result<Vec<String>, LoadError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| LoadError::io(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::io(&self.dir, e))?;
            let path = entry.path();
            if !path.is_dir() || !path.join(&self.entry_file).is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        tracing::debug!(dir = %self.dir.display(), count = names.len(), "enumerated plugins");
        Ok(names)
    }
}
