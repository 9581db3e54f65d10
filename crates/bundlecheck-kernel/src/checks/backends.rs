use bundlecheck_types::{BuildContext, CheckOutcome, Platform};

use super::Check;
use crate::locator::{self, ArtifactName};
use crate::{BundleLayout, permission};

/// Reason recorded when the wayland backend is skipped under CI.
pub const WAYLAND_CI_SKIP: &str =
    "wayland backends are optional under continuous integration";

/// What to do with one windowing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendPlan {
    Check(&'static str),
    Skip(&'static str, &'static str),
}

/// Backends expected for this context.
///
/// macOS ships exactly cocoa. Everywhere else x11 is required and wayland is
/// required outside CI, where headless runners often lack it.
pub fn backend_plan(ctx: &BuildContext) -> Vec<BackendPlan> {
    match ctx.platform {
        Platform::MacOs => vec![BackendPlan::Check("cocoa")],
        Platform::Linux | Platform::Other => {
            let wayland = if ctx.ci {
                BackendPlan::Skip("wayland", WAYLAND_CI_SKIP)
            } else {
                BackendPlan::Check("wayland")
            };
            vec![BackendPlan::Check("x11"), wayland]
        }
    }
}

/// Each expected windowing backend library exists and is executable.
#[derive(Debug, Clone)]
pub struct BackendsCheck {
    layout: BundleLayout,
}

impl BackendsCheck {
    pub fn new(layout: BundleLayout) -> Self {
        Self { layout }
    }
}

impl Check for BackendsCheck {
    fn name(&self) -> &str {
        "windowing_backends"
    }

    fn run(&self, ctx: &BuildContext) -> Vec<CheckOutcome> {
        backend_plan(ctx)
            .into_iter()
            .map(|plan| match plan {
                BackendPlan::Skip(backend, reason) => {
                    let name = ArtifactName::WindowingBackend(backend.into());
                    CheckOutcome::skipped(name.to_string(), reason)
                }
                BackendPlan::Check(backend) => {
                    let name = ArtifactName::WindowingBackend(backend.into());
                    match locator::locate(&name, &self.layout, ctx) {
                        Ok(artifact) => permission::check(&artifact),
                        Err(err) => CheckOutcome::failed(name.to_string(), &err),
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_is_cocoa_only() {
        let ctx = BuildContext::new(Platform::MacOs).with_ci(true);
        assert_eq!(backend_plan(&ctx), vec![BackendPlan::Check("cocoa")]);
    }

    #[test]
    fn linux_outside_ci_checks_wayland() {
        let ctx = BuildContext::new(Platform::Linux);
        assert_eq!(
            backend_plan(&ctx),
            vec![BackendPlan::Check("x11"), BackendPlan::Check("wayland")]
        );
    }

    #[test]
    fn linux_under_ci_skips_wayland() {
        let ctx = BuildContext::new(Platform::Linux).with_ci(true);
        assert_eq!(
            backend_plan(&ctx),
            vec![
                BackendPlan::Check("x11"),
                BackendPlan::Skip("wayland", WAYLAND_CI_SKIP)
            ]
        );
    }

    #[test]
    fn other_platform_backends_are_unresolvable() {
        let check = BackendsCheck::new(BundleLayout::new("/b", "kitty"));
        let outcomes = check.run(&BuildContext::new(Platform::Other).with_ci(true));
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].kind(), Some("ArtifactNotResolvable"));
        assert!(outcomes[1].is_skipped());
    }
}
