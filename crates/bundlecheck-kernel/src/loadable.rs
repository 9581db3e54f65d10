//! The `Loadable` capability and the shared fail-collect loop.
//!
//! Native modules, shader programs, the plugin registry and bundled packages
//! all answer the same question, "can `name` be loaded?". Checks that load
//! several names go through [`load_each`] so one broken entry never hides
//! the verdict on the others.

use bundlecheck_types::{CheckError, CheckOutcome, LoadError};

/// Something the harness can attempt to load by name.
pub trait Loadable {
    /// Attempt a full load of `name`. No retries.
    fn try_load(&self, name: &str) -> Result<(), LoadError>;

    /// Human-readable description of what was loaded, for passing outcomes.
    fn describe(&self, name: &str) -> String {
        format!("{name} loaded")
    }
}

impl<T: Loadable + ?Sized> Loadable for Box<T> {
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        (**self).try_load(name)
    }

    fn describe(&self, name: &str) -> String {
        (**self).describe(name)
    }
}

/// Load every name in order, producing one outcome per name.
///
/// Outcomes are named `<prefix>:<name>`; `wrap` turns a load failure into
/// the check's error kind.
pub fn load_each<L, F>(prefix: &str, loader: &L, names: &[String], wrap: F) -> Vec<CheckOutcome>
where
    L: Loadable + ?Sized,
    F: Fn(&str, LoadError) -> CheckError,
{
    names
        .iter()
        .map(|name| {
            let check = format!("{prefix}:{name}");
            match loader.try_load(name) {
                Ok(()) => CheckOutcome::passed(check, loader.describe(name)),
                Err(err) => CheckOutcome::failed(check, &wrap(name, err)),
            }
        })
        .collect()
}
