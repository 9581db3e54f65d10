//! Failure taxonomy.
//!
//! Every variant of [`CheckError`] is recoverable at the run level: a check
//! converts it into a failed [`CheckOutcome`](crate::CheckOutcome) and the run
//! continues with the next check.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{ArtifactKind, Permission, Platform};

/// Why a collaborator could not load or enumerate something.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    /// The dynamic loader rejected the file (bad ABI, unresolved dependency).
    #[error("cannot load {}: {reason}", path.display())]
    Link { path: PathBuf, reason: String },

    #[error("symbol {symbol} not exported by {}", path.display())]
    MissingSymbol { path: PathBuf, symbol: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file loaded but its contents are unusable.
    #[error("{0}")]
    Invalid(String),

    /// The thing to load has no location on this platform or is not declared.
    #[error("{0}")]
    Unresolvable(String),
}

impl LoadError {
    /// Wrap an I/O error, mapping `NotFound` onto the dedicated variant.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound(path)
        } else {
            LoadError::Io { path, source }
        }
    }
}

/// A failed check, naming the artifact, module, shader or plugin involved.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{name} missing at {}", path.display())]
    MissingArtifact { name: String, path: PathBuf },

    #[error("{name} at {} lacks {permission} permission", path.display())]
    InsufficientPermission {
        name: String,
        path: PathBuf,
        permission: Permission,
    },

    #[error("{name} at {} is not a {expected}", path.display())]
    ArtifactKindMismatch {
        name: String,
        path: PathBuf,
        expected: ArtifactKind,
    },

    #[error("{name} at {} does not have '{expected}' in its file name", path.display())]
    UnexpectedArtifactName {
        name: String,
        path: PathBuf,
        expected: String,
    },

    #[error("cannot resolve {name} on platform {platform}")]
    ArtifactNotResolvable { name: String, platform: Platform },

    #[error("failed to load extension module {module}: {source}")]
    ExtensionLoadFailure {
        module: String,
        #[source]
        source: LoadError,
    },

    #[error("failed to compile shader {shader}: {source}")]
    ShaderCompileFailure {
        shader: String,
        #[source]
        source: LoadError,
    },

    #[error("no graphics context available for shader {shader}: {reason}")]
    GraphicsContextUnavailable { shader: String, reason: String },

    #[error("required plugin(s) not registered: {}", names.join(", "))]
    MissingRequiredPlugin { names: Vec<String> },

    #[error("only {count} plugins registered, need more than {minimum}")]
    TooFewPlugins { count: usize, minimum: usize },

    #[error("plugin registry unavailable: {source}")]
    RegistryUnavailable {
        #[source]
        source: LoadError,
    },

    #[error("{store} holds {count} root certificates, need more than {minimum}")]
    InsufficientTrustRoots {
        store: String,
        count: usize,
        minimum: usize,
    },

    #[error("bundled dependency {dependency} unavailable: {source}")]
    MissingBundledDependency {
        dependency: String,
        #[source]
        source: LoadError,
    },

    /// A check panicked. Still reported as a failed outcome.
    #[error("internal harness defect: {0}")]
    InternalDefect(String),
}

impl CheckError {
    /// Stable name of the error kind, recorded on failed outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::MissingArtifact { .. } => "MissingArtifact",
            CheckError::InsufficientPermission { .. } => "InsufficientPermission",
            CheckError::ArtifactKindMismatch { .. } => "ArtifactKindMismatch",
            CheckError::UnexpectedArtifactName { .. } => "UnexpectedArtifactName",
            CheckError::ArtifactNotResolvable { .. } => "ArtifactNotResolvable",
            CheckError::ExtensionLoadFailure { .. } => "ExtensionLoadFailure",
            CheckError::ShaderCompileFailure { .. } => "ShaderCompileFailure",
            CheckError::GraphicsContextUnavailable { .. } => "GraphicsContextUnavailable",
            CheckError::MissingRequiredPlugin { .. } => "MissingRequiredPlugin",
            CheckError::TooFewPlugins { .. } => "TooFewPlugins",
            CheckError::RegistryUnavailable { .. } => "RegistryUnavailable",
            CheckError::InsufficientTrustRoots { .. } => "InsufficientTrustRoots",
            CheckError::MissingBundledDependency { .. } => "MissingBundledDependency",
            CheckError::InternalDefect(_) => "InternalDefect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err = LoadError::io("/nope", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, LoadError::NotFound(_)));

        let err = LoadError::io("/nope", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn messages_name_the_subject() {
        let err = CheckError::ExtensionLoadFailure {
            module: "rsync".into(),
            source: LoadError::Link {
                path: "/b/rsync.so".into(),
                reason: "undefined symbol: foo".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("rsync"), "{msg}");
        assert!(msg.contains("undefined symbol: foo"), "{msg}");
        assert_eq!(err.kind(), "ExtensionLoadFailure");
    }

    #[test]
    fn missing_plugins_are_listed() {
        let err = CheckError::MissingRequiredPlugin {
            names: vec!["diff".into(), "hints".into()],
        };
        assert_eq!(err.to_string(), "required plugin(s) not registered: diff, hints");
    }

    #[test]
    fn threshold_messages() {
        let err = CheckError::InsufficientTrustRoots {
            store: "trust store".into(),
            count: 1,
            minimum: 2,
        };
        assert_eq!(
            err.to_string(),
            "trust store holds 1 root certificates, need more than 2"
        );
        assert_eq!(err.kind(), "InsufficientTrustRoots");
    }
}
