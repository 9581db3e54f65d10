//! Artifact locator: logical artifact name + context → [`BuildArtifact`].
//!
//! Pure path computation; nothing here touches the filesystem.

use std::fmt;
use std::path::PathBuf;

use bundlecheck_types::{ArtifactKind, BuildArtifact, BuildContext, CheckError, Permission};

use crate::BundleLayout;

/// The build outputs the harness knows how to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactName {
    MainExecutable,
    WindowingBackend(String),
    TerminfoDir,
    LogoFile,
    ShellIntegrationScript,
    ShaderDir,
    PluginDir,
    ExtensionModule { name: String, path: PathBuf },
    TrustStore,
    HighlightEngine,
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactName::MainExecutable => f.write_str("executable"),
            ArtifactName::WindowingBackend(b) => write!(f, "backend:{b}"),
            ArtifactName::TerminfoDir => f.write_str("terminfo"),
            ArtifactName::LogoFile => f.write_str("logo"),
            ArtifactName::ShellIntegrationScript => f.write_str("shell-integration"),
            ArtifactName::ShaderDir => f.write_str("shaders"),
            ArtifactName::PluginDir => f.write_str("plugins"),
            ArtifactName::ExtensionModule { name, .. } => write!(f, "extension:{name}"),
            ArtifactName::TrustStore => f.write_str("trust-store"),
            ArtifactName::HighlightEngine => f.write_str("highlight-engine"),
        }
    }
}

/// Resolve `name` to exactly one path for this context.
///
/// Fails with [`CheckError::ArtifactNotResolvable`] when the artifact has no
/// location on the context's platform.
pub fn locate(
    name: &ArtifactName,
    layout: &BundleLayout,
    ctx: &BuildContext,
) -> Result<BuildArtifact, CheckError> {
    let platform = ctx.platform;
    let label = name.to_string();

    let (path, kind, permission) = match name {
        ArtifactName::MainExecutable => (
            layout.executable(platform),
            ArtifactKind::Executable,
            Permission::Execute,
        ),
        ArtifactName::WindowingBackend(backend) => {
            let path = layout.backend_library(platform, backend).ok_or_else(|| {
                CheckError::ArtifactNotResolvable {
                    name: label.clone(),
                    platform,
                }
            })?;
            (path, ArtifactKind::SharedLibrary, Permission::Execute)
        }
        ArtifactName::TerminfoDir => (
            layout.terminfo_dir(platform),
            ArtifactKind::Directory,
            Permission::Read,
        ),
        ArtifactName::LogoFile => (
            layout.logo_file(platform),
            ArtifactKind::DataFile,
            Permission::Read,
        ),
        ArtifactName::ShellIntegrationScript => (
            layout.shell_integration_script(platform),
            ArtifactKind::DataFile,
            Permission::Read,
        ),
        ArtifactName::ShaderDir => (
            layout.shader_dir(platform),
            ArtifactKind::Directory,
            Permission::Read,
        ),
        ArtifactName::PluginDir => (
            layout.plugin_dir(platform),
            ArtifactKind::Directory,
            Permission::Read,
        ),
        ArtifactName::ExtensionModule { path, .. } => (
            layout.extension(platform, path),
            ArtifactKind::SharedLibrary,
            Permission::Read,
        ),
        ArtifactName::TrustStore => (
            layout.trust_store(platform),
            ArtifactKind::DataFile,
            Permission::Read,
        ),
        ArtifactName::HighlightEngine => (
            layout.highlight_engine(platform),
            ArtifactKind::Directory,
            Permission::Read,
        ),
    };

    Ok(BuildArtifact::new(label, path, kind, permission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlecheck_types::Platform;

    fn layout() -> BundleLayout {
        BundleLayout::new("/opt/kitty", "kitty")
    }

    #[test]
    fn executable_requires_execute() {
        let ctx = BuildContext::new(Platform::Linux);
        let artifact = locate(&ArtifactName::MainExecutable, &layout(), &ctx).expect("locate");
        assert_eq!(artifact.name(), "executable");
        assert_eq!(artifact.kind(), ArtifactKind::Executable);
        assert_eq!(artifact.permission(), Permission::Execute);
        assert_eq!(artifact.path(), PathBuf::from("/opt/kitty/bin/kitty"));
    }

    #[test]
    fn backend_is_unresolvable_on_other_platforms() {
        let ctx = BuildContext::new(Platform::Other);
        let err = locate(
            &ArtifactName::WindowingBackend("x11".into()),
            &layout(),
            &ctx,
        )
        .expect_err("no backend on other");
        assert_eq!(err.kind(), "ArtifactNotResolvable");
        assert!(err.to_string().contains("backend:x11"));
    }

    #[test]
    fn backend_requires_execute() {
        let ctx = BuildContext::new(Platform::MacOs);
        let artifact = locate(
            &ArtifactName::WindowingBackend("cocoa".into()),
            &layout(),
            &ctx,
        )
        .expect("locate");
        assert_eq!(artifact.kind(), ArtifactKind::SharedLibrary);
        assert_eq!(artifact.permission(), Permission::Execute);
        assert!(artifact.path().ends_with("glfw-cocoa.so"));
    }

    #[test]
    fn locate_is_deterministic() {
        let ctx = BuildContext::new(Platform::Linux);
        let a = locate(&ArtifactName::TerminfoDir, &layout(), &ctx).expect("locate");
        let b = locate(&ArtifactName::TerminfoDir, &layout(), &ctx).expect("locate");
        assert_eq!(a, b);
        assert_eq!(a.kind(), ArtifactKind::Directory);
    }

    #[test]
    fn extension_paths_are_package_relative() {
        let ctx = BuildContext::new(Platform::Linux);
        let name = ArtifactName::ExtensionModule {
            name: "rsync".into(),
            path: "kittens/transfer/rsync.so".into(),
        };
        let artifact = locate(&name, &layout(), &ctx).expect("locate");
        assert_eq!(artifact.name(), "extension:rsync");
        assert_eq!(
            artifact.path(),
            PathBuf::from("/opt/kitty/lib/kitty/kittens/transfer/rsync.so")
        );
    }
}
