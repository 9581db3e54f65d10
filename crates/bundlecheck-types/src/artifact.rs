//! Build artifacts: named outputs resolved to a filesystem path.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What kind of filesystem object an artifact is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Executable,
    SharedLibrary,
    DataFile,
    Directory,
}

impl ArtifactKind {
    /// Whether the artifact must be a regular file (as opposed to a directory).
    pub fn is_file(&self) -> bool {
        !matches!(self, ArtifactKind::Directory)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::Executable => "executable",
            ArtifactKind::SharedLibrary => "shared library",
            ArtifactKind::DataFile => "data file",
            ArtifactKind::Directory => "directory",
        })
    }
}

/// Access the harness requires on an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Execute,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Permission::Read => "read",
            Permission::Execute => "execute",
        })
    }
}

/// A build output resolved for the current context.
///
/// Created by the locator; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildArtifact {
    name: String,
    path: PathBuf,
    kind: ArtifactKind,
    permission: Permission,
}

impl BuildArtifact {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        kind: ArtifactKind,
        permission: Permission,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            permission,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }
}
