//! Assembles the standard check suite.
//!
//! Order is fixed: structural checks (executable, data locations, backends)
//! first, then load checks (extensions, shaders), then registry and
//! context-conditional checks. Each collaborator can be replaced, which is
//! how tests run the suite without a real bundle.

use std::path::PathBuf;

use bundlecheck_types::{BuildContext, LoadError};

use crate::checks::{
    BackendsCheck, Check, ExecutableCheck, ExtensionsCheck, HighlightCheck, LocationsCheck,
    PluginsCheck, ShadersCheck, TrustStoreCheck,
};
use crate::locator::{self, ArtifactName};
use crate::native::NativeModuleLoader;
use crate::package::BundledPackage;
use crate::registry::{DirectoryPluginSource, PluginSource};
use crate::shader::{ShaderRuntime, SourceShaderRuntime};
use crate::trust::{NativeRoots, PemBundle, TrustStore};
use crate::{BundleLayout, HarnessConfig, Loadable};

pub struct SuiteBuilder {
    config: HarnessConfig,
    layout: BundleLayout,
    ctx: BuildContext,
    extension_loader: Option<Box<dyn Loadable>>,
    shader_runtime: Option<Box<dyn ShaderRuntime>>,
    plugin_source: Option<Box<dyn PluginSource>>,
    trust_store: Option<Box<dyn TrustStore>>,
    highlight_loader: Option<Box<dyn Loadable>>,
}

impl SuiteBuilder {
    pub fn new(config: &HarnessConfig, ctx: BuildContext) -> Self {
        Self {
            config: config.clone(),
            layout: BundleLayout::from_config(config),
            ctx,
            extension_loader: None,
            shader_runtime: None,
            plugin_source: None,
            trust_store: None,
            highlight_loader: None,
        }
    }

    pub fn extension_loader(mut self, loader: Box<dyn Loadable>) -> Self {
        self.extension_loader = Some(loader);
        self
    }

    pub fn shader_runtime(mut self, runtime: Box<dyn ShaderRuntime>) -> Self {
        self.shader_runtime = Some(runtime);
        self
    }

    pub fn plugin_source(mut self, source: Box<dyn PluginSource>) -> Self {
        self.plugin_source = Some(source);
        self
    }

    pub fn trust_store(mut self, store: Box<dyn TrustStore>) -> Self {
        self.trust_store = Some(store);
        self
    }

    pub fn highlight_loader(mut self, loader: Box<dyn Loadable>) -> Self {
        self.highlight_loader = Some(loader);
        self
    }

    pub fn build(self) -> Vec<Box<dyn Check>> {
        let config = &self.config;
        let layout = &self.layout;

        let extension_loader = self.extension_loader.unwrap_or_else(|| {
            Box::new(NativeModuleLoader::new(
                layout.clone(),
                self.ctx,
                config.extensions.clone(),
            ))
        });
        let shader_runtime = self.shader_runtime.unwrap_or_else(|| -> Box<dyn ShaderRuntime> {
            match locate_path(ArtifactName::ShaderDir, layout, &self.ctx) {
                Ok(dir) => Box::new(SourceShaderRuntime::new(dir, layout.app_name())),
                Err(unresolved) => Box::new(unresolved),
            }
        });
        let plugin_source = self.plugin_source.unwrap_or_else(|| -> Box<dyn PluginSource> {
            match locate_path(ArtifactName::PluginDir, layout, &self.ctx) {
                Ok(dir) => Box::new(DirectoryPluginSource::new(dir, &config.plugin_entry)),
                Err(unresolved) => Box::new(unresolved),
            }
        });
        let trust_store = self.trust_store.unwrap_or_else(|| -> Box<dyn TrustStore> {
            if config.platform_trust_store {
                return Box::new(NativeRoots);
            }
            match locate_path(ArtifactName::TrustStore, layout, &self.ctx) {
                Ok(path) => Box::new(PemBundle::new(path)),
                Err(unresolved) => Box::new(unresolved),
            }
        });
        let highlight_loader = self.highlight_loader.unwrap_or_else(|| -> Box<dyn Loadable> {
            match locate_path(ArtifactName::HighlightEngine, layout, &self.ctx) {
                Ok(dir) => Box::new(BundledPackage::new(dir, &config.highlight_entry)),
                Err(unresolved) => Box::new(unresolved),
            }
        });

        let modules = config.extensions.iter().map(|m| m.name.clone()).collect();

        vec![
            Box::new(ExecutableCheck::new(layout.clone())),
            Box::new(LocationsCheck::new(layout.clone())),
            Box::new(BackendsCheck::new(layout.clone())),
            Box::new(ExtensionsCheck::new(modules, extension_loader)),
            Box::new(ShadersCheck::new(config.shaders.clone(), shader_runtime)),
            Box::new(PluginsCheck::new(
                plugin_source,
                config.required_plugins.clone(),
                config.min_plugins,
            )),
            Box::new(TrustStoreCheck::new(trust_store, config.min_trust_roots)),
            Box::new(HighlightCheck::new(
                config.highlight_engine.clone(),
                highlight_loader,
            )),
        ]
    }
}

/// Path of a collaborator's artifact, or a stand-in that fails every load.
fn locate_path(
    name: ArtifactName,
    layout: &BundleLayout,
    ctx: &BuildContext,
) -> Result<PathBuf, Unresolved> {
    locator::locate(&name, layout, ctx)
        .map(|artifact| artifact.path().to_path_buf())
        .map_err(|err| Unresolved(err.to_string()))
}

/// Collaborator for an artifact the locator could not place.
struct Unresolved(String);

impl Unresolved {
    fn error(&self) -> LoadError {
        LoadError::Unresolvable(self.0.clone())
    }
}

impl Loadable for Unresolved {
    fn try_load(&self, _name: &str) -> Result<(), LoadError> {
        Err(self.error())
    }
}

impl ShaderRuntime for Unresolved {
    fn context(&self) -> Result<(), String> {
        Ok(())
    }
}

impl PluginSource for Unresolved {
    fn plugin_names(&self) -> Result<Vec<String>, LoadError> {
        Err(self.error())
    }
}

impl TrustStore for Unresolved {
    fn describe(&self) -> String {
        self.0.clone()
    }

    fn root_count(&self) -> Result<usize, LoadError> {
        Err(self.error())
    }
}
