//! Test utilities for bundlecheck.
//!
//! - [`FakeBundle`]: a complete bundle laid out in a temporary directory,
//!   which tests then damage one artifact at a time
//! - scripted collaborators ([`StaticLoader`], [`FakeShaderRuntime`],
//!   [`FixedPlugins`], [`CountedTrustStore`]) for driving checks without a
//!   real runtime

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bundlecheck_kernel::config::ExtensionSpec;
use bundlecheck_kernel::registry::PluginSource;
use bundlecheck_kernel::shader::{STAGES, ShaderRuntime};
use bundlecheck_kernel::trust::TrustStore;
use bundlecheck_kernel::{BundleLayout, HarnessConfig, Loadable};
use bundlecheck_types::{LoadError, Platform};
use tempfile::TempDir;

pub const APP_NAME: &str = "kitty";

/// Plugins every fake bundle ships; more than the default minimum.
pub const PLUGINS: &[&str] = &[
    "ask", "choose", "clipboard", "diff", "hints", "icat", "query_terminal", "show_key",
    "themes", "transfer", "unicode_input",
];

/// Programs every fake bundle ships; matches the default shader list.
pub const SHADERS: &[&str] = &["cell", "border", "bgimage", "tint", "blit", "graphics"];

pub const DEFAULT_TRUST_ROOTS: usize = 5;

const SHADER_BODY: &str = "#version 330\n\nvoid main() {\n    gl_Position = vec4(0.0);\n}\n";

/// PEM bundle holding `count` certificates.
///
/// The payloads are not valid DER; only the PEM framing is meaningful.
pub fn pem_bundle(count: usize) -> String {
    (0..count)
        .map(|i| {
            let payload = STANDARD.encode(format!("fake root certificate {i}"));
            format!("-----BEGIN CERTIFICATE-----\n{payload}\n-----END CERTIFICATE-----\n")
        })
        .collect()
}

/// A complete, healthy bundle in a temporary directory.
pub struct FakeBundle {
    dir: TempDir,
    platform: Platform,
    layout: BundleLayout,
}

impl FakeBundle {
    pub fn new(platform: Platform) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let layout = BundleLayout::new(dir.path(), APP_NAME);
        let bundle = Self {
            dir,
            platform,
            layout,
        };
        bundle.populate()?;
        Ok(bundle)
    }

    pub fn linux() -> io::Result<Self> {
        Self::new(Platform::Linux)
    }

    pub fn macos() -> io::Result<Self> {
        Self::new(Platform::MacOs)
    }

    fn populate(&self) -> io::Result<()> {
        let layout = &self.layout;
        let platform = self.platform;

        write_executable(&layout.executable(platform), b"#!/bin/sh\nexit 0\n")?;
        for backend in ["x11", "wayland", "cocoa"] {
            if let Some(lib) = layout.backend_library(platform, backend) {
                write_executable(&lib, b"\x7fELF")?;
            }
        }

        fs::create_dir_all(layout.terminfo_dir(platform).join("x"))?;
        write_file(&layout.logo_file(platform), b"\x89PNG\r\n\x1a\n")?;
        write_file(
            &layout.shell_integration_script(platform),
            b"# zsh integration\n",
        )?;

        let shaders = layout.shader_dir(platform);
        for program in SHADERS {
            for stage in STAGES {
                write_file(
                    &shaders.join(format!("{program}_{stage}.glsl")),
                    SHADER_BODY.as_bytes(),
                )?;
            }
        }

        for plugin in PLUGINS {
            self.add_plugin(plugin)?;
        }

        self.write_trust_store(DEFAULT_TRUST_ROOTS)?;
        write_file(
            &layout.highlight_engine(platform).join("__init__.py"),
            b"__version__ = '2.18'\n",
        )?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    /// Configuration pointing at this bundle.
    ///
    /// Declares no native extensions, since a temporary directory cannot hold
    /// a loadable shared object for the host.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            app_name: APP_NAME.to_string(),
            bundle_root: self.root().to_path_buf(),
            extensions: Vec::new(),
            ..HarnessConfig::default()
        }
    }

    /// Path inside the package directory.
    pub fn package_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.layout.package_dir(self.platform).join(relative)
    }

    /// Remove a file or directory.
    pub fn remove(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }

    #[cfg(unix)]
    pub fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }

    pub fn add_plugin(&self, name: &str) -> io::Result<()> {
        let dir = self.layout.plugin_dir(self.platform).join(name);
        write_file(&dir.join("main.py"), b"def main(args): pass\n")
    }

    pub fn remove_plugin(&self, name: &str) -> io::Result<()> {
        fs::remove_dir_all(self.layout.plugin_dir(self.platform).join(name))
    }

    pub fn write_trust_store(&self, roots: usize) -> io::Result<()> {
        write_file(
            &self.layout.trust_store(self.platform),
            pem_bundle(roots).as_bytes(),
        )
    }

    /// Declare an extension backed by a file no loader accepts.
    pub fn add_broken_extension(&self, name: &str, relative: &str) -> io::Result<ExtensionSpec> {
        write_file(&self.package_path(relative), b"not a shared object")?;
        Ok(ExtensionSpec::new(name, relative))
    }

    /// Overwrite one stage of a shader program.
    pub fn write_shader(&self, program: &str, stage: &str, source: &str) -> io::Result<()> {
        write_file(
            &self
                .layout
                .shader_dir(self.platform)
                .join(format!("{program}_{stage}.glsl")),
            source.as_bytes(),
        )
    }
}

fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

fn write_executable(path: &Path, contents: &[u8]) -> io::Result<()> {
    write_file(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

/// Loads everything except the names it was told to reject.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    failures: BTreeMap<String, String>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(name.into(), reason.into());
        self
    }
}

impl Loadable for StaticLoader {
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        match self.failures.get(name) {
            Some(reason) => Err(LoadError::Invalid(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Shader runtime with a scripted graphics context.
#[derive(Debug, Clone, Default)]
pub struct FakeShaderRuntime {
    unavailable: Option<String>,
    programs: StaticLoader,
}

impl FakeShaderRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// No graphics context; every program fails with `reason`.
    pub fn without_context(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            programs: StaticLoader::new(),
        }
    }

    pub fn failing(mut self, program: impl Into<String>, reason: impl Into<String>) -> Self {
        self.programs = self.programs.failing(program, reason);
        self
    }
}

impl Loadable for FakeShaderRuntime {
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        self.programs.try_load(name)
    }
}

impl ShaderRuntime for FakeShaderRuntime {
    fn context(&self) -> Result<(), String> {
        match &self.unavailable {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }
}

/// Plugin source with a fixed answer.
#[derive(Debug, Clone)]
pub enum FixedPlugins {
    Names(Vec<String>),
    Unavailable(String),
}

impl FixedPlugins {
    pub fn names(names: &[&str]) -> Self {
        Self::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl PluginSource for FixedPlugins {
    fn plugin_names(&self) -> Result<Vec<String>, LoadError> {
        match self {
            Self::Names(names) => Ok(names.clone()),
            Self::Unavailable(reason) => Err(LoadError::Invalid(reason.clone())),
        }
    }
}

/// Trust store holding a fixed number of roots, or none at all.
#[derive(Debug, Clone, Copy)]
pub struct CountedTrustStore(pub Option<usize>);

impl TrustStore for CountedTrustStore {
    fn describe(&self) -> String {
        "scripted trust store".to_string()
    }

    fn root_count(&self) -> Result<usize, LoadError> {
        self.0
            .ok_or_else(|| LoadError::NotFound(PathBuf::from("cacert.pem")))
    }
}
