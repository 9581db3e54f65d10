//! bundlecheck-kernel: the verification harness.
//!
//! This crate provides:
//!
//! - **Layout / locator**: where each build output lives for a given platform
//! - **Permission checker**: existence, kind and execute-bit checks (metadata only)
//! - **Loaders**: the [`Loadable`] capability for native modules, shader
//!   programs, the plugin registry and bundled packages
//! - **Checks**: one [`Check`] per component, assembled by [`SuiteBuilder`]
//! - **Runner**: fail-collect execution producing a [`RunReport`]

pub mod checks;
pub mod config;
pub mod context;
pub mod layout;
pub mod loadable;
pub mod locator;
pub mod native;
pub mod package;
pub mod paths;
pub mod permission;
pub mod registry;
pub mod runner;
pub mod shader;
pub mod suite;
pub mod trust;

pub use bundlecheck_types::{
    ArtifactKind, BuildArtifact, BuildContext, CheckError, CheckOutcome, LoadError, Permission,
    Platform, Status,
};
pub use checks::{Applicability, Check};
pub use config::{ConfigError, ExtensionSpec, HarnessConfig};
pub use layout::BundleLayout;
pub use loadable::Loadable;
pub use locator::ArtifactName;
pub use runner::{RunReport, Runner};
pub use suite::SuiteBuilder;
