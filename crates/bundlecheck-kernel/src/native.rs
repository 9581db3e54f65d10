//! Native extension module loading.
//!
//! Modules are opened with the platform dynamic loader, which runs their
//! initializers and resolves their link-time dependencies. This is the only
//! module in bundlecheck that uses unsafe code: opening a shared object runs
//! foreign code, which Rust cannot check.

use std::path::Path;

use bundlecheck_types::{BuildContext, LoadError};
use libloading::Library;

use crate::locator::{self, ArtifactName};
use crate::{BundleLayout, ExtensionSpec, Loadable};

/// Loads the configured extension modules from the bundle's package directory.
#[derive(Debug, Clone)]
pub struct NativeModuleLoader {
    layout: BundleLayout,
    ctx: BuildContext,
    modules: Vec<ExtensionSpec>,
}

impl NativeModuleLoader {
    pub fn new(layout: BundleLayout, ctx: BuildContext, modules: Vec<ExtensionSpec>) -> Self {
        Self {
            layout,
            ctx,
            modules,
        }
    }

    /// Module names, in configuration order.
    pub fn names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name.clone()).collect()
    }

    fn spec(&self, name: &str) -> Option<&ExtensionSpec> {
        self.modules.iter().find(|m| m.name == name)
    }
}

impl Loadable for NativeModuleLoader {
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        let spec = self
            .spec(name)
            .ok_or_else(|| LoadError::Unresolvable(format!("no extension module named {name}")))?;
        let artifact = locator::locate(
            &ArtifactName::ExtensionModule {
                name: spec.name.clone(),
                path: spec.path.clone(),
            },
            &self.layout,
            &self.ctx,
        )
        .map_err(|e| LoadError::Unresolvable(e.to_string()))?;

        let path = artifact.path();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        tracing::debug!(module = name, path = %path.display(), "loading extension module");
        load_library(path, spec.init_symbol.as_deref())
    }

    fn describe(&self, name: &str) -> String {
        match self.spec(name) {
            Some(spec) => format!("{name} loaded from {}", spec.path.display()),
            None => format!("{name} loaded"),
        }
    }
}

/// Open `path` and, if given, resolve `symbol` in it.
///
/// The library is closed again before returning; loading is idempotent.
#[allow(unsafe_code)]
pub fn load_library(path: &Path, symbol: Option<&str>) -> Result<(), LoadError> {
    // SAFETY: opening a shared object runs its static initializers. The
    // harness exists to exercise exactly that; the objects come from the
    // build under test.
    let library = unsafe { Library::new(path) }.map_err(|e| LoadError::Link {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if let Some(symbol) = symbol {
        // SAFETY: the symbol is only looked up, never called, so the
        // declared function type is irrelevant.
        let lookup = unsafe { library.get::<unsafe extern "C" fn()>(symbol.as_bytes()) }.map(|_| ());
        if let Err(err) = lookup {
            tracing::debug!(symbol, error = %err, "symbol lookup failed");
            return Err(LoadError::MissingSymbol {
                path: path.to_path_buf(),
                symbol: symbol.to_string(),
            });
        }
    }

    drop(library);
    Ok(())
}
