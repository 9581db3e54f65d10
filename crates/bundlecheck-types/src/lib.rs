//! bundlecheck-types: the data model shared by the harness crates.
//!
//! Everything here is plain data. Nothing touches the filesystem or the
//! process environment; that lives in `bundlecheck-kernel`.
//!
//! - [`BuildContext`] / [`Platform`]: facts resolved once per run
//! - [`BuildArtifact`]: a named build output with its resolved path
//! - [`CheckOutcome`]: the result of one check against one artifact
//! - [`CheckError`] / [`LoadError`]: the failure taxonomy

mod artifact;
mod context;
mod error;
mod outcome;

pub use artifact::{ArtifactKind, BuildArtifact, Permission};
pub use context::{BuildContext, Platform, UnknownPlatform};
pub use error::{CheckError, LoadError};
pub use outcome::{CheckOutcome, Status};
