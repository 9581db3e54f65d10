//! Bundled packages: directories of auxiliary code shipped inside the bundle.
//!
//! A package is importable when its directory exists and its entry file can
//! be opened.

use std::path::PathBuf;

use bundlecheck_types::LoadError;

use crate::Loadable;

#[derive(Debug, Clone)]
pub struct BundledPackage {
    dir: PathBuf,
    entry_file: String,
}

impl BundledPackage {
    pub fn new(dir: impl Into<PathBuf>, entry_file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            entry_file: entry_file.into(),
        }
    }
}

impl Loadable for BundledPackage {
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        if !self.dir.is_dir() {
            return Err(LoadError::NotFound(self.dir.clone()));
        }
        let entry = self.dir.join(&self.entry_file);
        std::fs::File::open(&entry).map_err(|e| LoadError::io(&entry, e))?;
        tracing::debug!(package = name, dir = %self.dir.display(), "bundled package importable");
        Ok(())
    }

    fn describe(&self, name: &str) -> String {
        format!("{name} importable from {}", self.dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_with_entry_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("__init__.py"), "").expect("write");
        BundledPackage::new(dir.path(), "__init__.py")
            .try_load("pygments")
            .expect("importable");
    }

    #[test]
    fn package_without_entry_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = BundledPackage::new(dir.path(), "__init__.py")
            .try_load("pygments")
            .expect_err("no entry");
        assert!(matches!(err, LoadError::NotFound(ref p) if p.ends_with("__init__.py")));
    }

    #[test]
    fn missing_package_dir_fails() {
        let err = BundledPackage::new("/no/pygments", "__init__.py")
            .try_load("pygments")
            .expect_err("no dir");
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
