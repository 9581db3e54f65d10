//! Bundle layout: where build outputs live, per platform.
//!
//! | Output | Linux / other | macOS (root is the `.app`) |
//! |--------|---------------|----------------------------|
//! | Executable | `bin/<app>` | `Contents/MacOS/<app>` |
//! | Package dir | `lib/<app>` | `Contents/Resources/<app>` |
//!
//! Everything else hangs off the package directory. All methods are pure
//! path computation.

use std::path::{Path, PathBuf};

use bundlecheck_types::Platform;

use crate::HarnessConfig;

/// Path scheme for one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
    app_name: String,
    executable: Option<PathBuf>,
    trust_store: Option<PathBuf>,
    highlight_engine: String,
}

impl BundleLayout {
    pub fn new(root: impl Into<PathBuf>, app_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            app_name: app_name.into(),
            executable: None,
            trust_store: None,
            highlight_engine: "pygments".to_string(),
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        let mut layout = Self::new(&config.bundle_root, &config.app_name)
            .with_highlight_engine(&config.highlight_engine);
        layout.executable = config.executable.clone();
        layout.trust_store = config.trust_store.clone();
        layout
    }

    /// Use an executable other than the platform default, relative to the root.
    pub fn with_executable(mut self, relative: impl Into<PathBuf>) -> Self {
        self.executable = Some(relative.into());
        self
    }

    /// Use a trust store bundle outside the package directory.
    pub fn with_trust_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.trust_store = Some(path.into());
        self
    }

    pub fn with_highlight_engine(mut self, name: impl Into<String>) -> Self {
        self.highlight_engine = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn executable(&self, platform: Platform) -> PathBuf {
        if let Some(relative) = &self.executable {
            return self.root.join(relative);
        }
        match platform {
            Platform::MacOs => self.root.join("Contents").join("MacOS").join(&self.app_name),
            Platform::Linux | Platform::Other => self.root.join("bin").join(&self.app_name),
        }
    }

    pub fn package_dir(&self, platform: Platform) -> PathBuf {
        match platform {
            Platform::MacOs => self
                .root
                .join("Contents")
                .join("Resources")
                .join(&self.app_name),
            Platform::Linux | Platform::Other => self.root.join("lib").join(&self.app_name),
        }
    }

    /// Windowing backend library, or `None` where no backend is defined.
    pub fn backend_library(&self, platform: Platform, backend: &str) -> Option<PathBuf> {
        match platform {
            Platform::MacOs | Platform::Linux => {
                Some(self.package_dir(platform).join(format!("glfw-{backend}.so")))
            }
            Platform::Other => None,
        }
    }

    pub fn terminfo_dir(&self, platform: Platform) -> PathBuf {
        self.package_dir(platform).join("terminfo")
    }

    pub fn logo_file(&self, platform: Platform) -> PathBuf {
        self.package_dir(platform)
            .join("logo")
            .join(format!("{}.png", self.app_name))
    }

    pub fn shell_integration_script(&self, platform: Platform) -> PathBuf {
        self.package_dir(platform)
            .join("shell-integration")
            .join(format!("{}.zsh", self.app_name))
    }

    pub fn shader_dir(&self, platform: Platform) -> PathBuf {
        self.package_dir(platform).join("shaders")
    }

    pub fn plugin_dir(&self, platform: Platform) -> PathBuf {
        self.package_dir(platform).join("kittens")
    }

    pub fn extension(&self, platform: Platform, relative: &Path) -> PathBuf {
        self.package_dir(platform).join(relative)
    }

    pub fn trust_store(&self, platform: Platform) -> PathBuf {
        self.trust_store
            .clone()
            .unwrap_or_else(|| self.package_dir(platform).join("cacert.pem"))
    }

    pub fn highlight_engine(&self, platform: Platform) -> PathBuf {
        self.package_dir(platform).join(&self.highlight_engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_layout() {
        let layout = BundleLayout::new("/opt/kitty", "kitty");
        assert_eq!(
            layout.executable(Platform::Linux),
            PathBuf::from("/opt/kitty/bin/kitty")
        );
        assert_eq!(
            layout.backend_library(Platform::Linux, "x11"),
            Some(PathBuf::from("/opt/kitty/lib/kitty/glfw-x11.so"))
        );
        assert_eq!(
            layout.shell_integration_script(Platform::Linux),
            PathBuf::from("/opt/kitty/lib/kitty/shell-integration/kitty.zsh")
        );
    }

    #[test]
    fn macos_layout_is_app_bundle() {
        let layout = BundleLayout::new("/Applications/kitty.app", "kitty");
        assert_eq!(
            layout.executable(Platform::MacOs),
            PathBuf::from("/Applications/kitty.app/Contents/MacOS/kitty")
        );
        assert!(
            layout
                .terminfo_dir(Platform::MacOs)
                .starts_with("/Applications/kitty.app/Contents/Resources/kitty")
        );
    }

    #[test]
    fn executable_override_is_root_relative() {
        let layout = BundleLayout::new("/opt/kitty", "kitty").with_executable("launcher/run");
        assert_eq!(
            layout.executable(Platform::MacOs),
            PathBuf::from("/opt/kitty/launcher/run")
        );
    }

    #[test]
    fn other_platforms_have_no_backends() {
        let layout = BundleLayout::new("/b", "kitty");
        assert_eq!(layout.backend_library(Platform::Other, "x11"), None);
    }

    #[test]
    fn trust_store_override() {
        let layout = BundleLayout::new("/b", "kitty");
        assert_eq!(
            layout.trust_store(Platform::Linux),
            PathBuf::from("/b/lib/kitty/cacert.pem")
        );
        let layout = layout.with_trust_store("/etc/ssl/cert.pem");
        assert_eq!(
            layout.trust_store(Platform::Linux),
            PathBuf::from("/etc/ssl/cert.pem")
        );
    }

    #[test]
    fn from_config_carries_names() {
        let config = HarnessConfig {
            app_name: "demo".into(),
            bundle_root: "/srv/demo".into(),
            highlight_engine: "hl".into(),
            ..HarnessConfig::default()
        };
        let layout = BundleLayout::from_config(&config);
        assert_eq!(layout.app_name(), "demo");
        assert_eq!(
            layout.highlight_engine(Platform::Linux),
            PathBuf::from("/srv/demo/lib/demo/hl")
        );
    }
}
