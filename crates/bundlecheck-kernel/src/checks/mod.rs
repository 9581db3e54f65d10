//! Checks: one per harness component.
//!
//! A check declares whether it applies to a [`BuildContext`]; the runner
//! evaluates that first and records a skip without running the body when it
//! does not. Checks that cover several artifacts return one outcome each.

mod backends;
mod executable;
mod extensions;
mod highlight;
mod locations;
mod plugins;
mod shaders;
mod trust_store;

pub use backends::{BackendPlan, BackendsCheck, WAYLAND_CI_SKIP, backend_plan};
pub use executable::ExecutableCheck;
pub use extensions::ExtensionsCheck;
pub use highlight::HighlightCheck;
pub use locations::LocationsCheck;
pub use plugins::PluginsCheck;
pub use shaders::ShadersCheck;
pub use trust_store::TrustStoreCheck;

use bundlecheck_types::{BuildContext, CheckOutcome};

/// Skip reason for checks that only make sense on frozen builds.
pub const NOT_DISTRIBUTABLE: &str = "not a distributable build";

/// Whether a check runs against this build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    Applies,
    Skip(String),
}

/// A single verification step.
pub trait Check {
    /// Stable name, used for skip outcomes and logging.
    fn name(&self) -> &str;

    fn applicability(&self, _ctx: &BuildContext) -> Applicability {
        Applicability::Applies
    }

    /// Run the check. Failures are returned as outcomes, never raised.
    fn run(&self, ctx: &BuildContext) -> Vec<CheckOutcome>;
}

/// Applicability of checks that need a frozen build.
pub fn frozen_only(ctx: &BuildContext) -> Applicability {
    if ctx.frozen {
        Applicability::Applies
    } else {
        Applicability::Skip(NOT_DISTRIBUTABLE.to_string())
    }
}
