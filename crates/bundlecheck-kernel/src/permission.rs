//! Permission checker: existence, kind and execute access.
//!
//! Only metadata is consulted; artifact contents are never opened.

use std::io;
use std::path::Path;

use bundlecheck_types::{BuildArtifact, CheckError, CheckOutcome, Permission};

/// Check `artifact` and turn the verdict into an outcome named after it.
pub fn check(artifact: &BuildArtifact) -> CheckOutcome {
    CheckOutcome::from_result(artifact.name(), verify(artifact))
}

/// Existence, then kind, then (for execute artifacts) execute access.
pub fn verify(artifact: &BuildArtifact) -> Result<String, CheckError> {
    let path = artifact.path();
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "metadata failed");
            return Err(CheckError::MissingArtifact {
                name: artifact.name().to_string(),
                path: path.to_path_buf(),
            });
        }
    };

    let kind_ok = if artifact.kind().is_file() {
        meta.is_file()
    } else {
        meta.is_dir()
    };
    if !kind_ok {
        return Err(CheckError::ArtifactKindMismatch {
            name: artifact.name().to_string(),
            path: path.to_path_buf(),
            expected: artifact.kind(),
        });
    }

    if artifact.permission() == Permission::Execute {
        if let Err(err) = executable_access(path) {
            tracing::debug!(path = %path.display(), error = %err, "execute access denied");
            return Err(CheckError::InsufficientPermission {
                name: artifact.name().to_string(),
                path: path.to_path_buf(),
                permission: Permission::Execute,
            });
        }
    }

    Ok(format!("{} present at {}", artifact.kind(), path.display()))
}

/// Ask the kernel whether the current user may execute `path`.
#[cfg(unix)]
fn executable_access(path: &Path) -> io::Result<()> {
    use nix::unistd::{AccessFlags, access};
    access(path, AccessFlags::X_OK).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn executable_access(_path: &Path) -> io::Result<()> {
    Ok(())
}
