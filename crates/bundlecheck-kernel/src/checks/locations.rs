use bundlecheck_types::{BuildContext, CheckOutcome};

use super::Check;
use crate::locator::{self, ArtifactName};
use crate::{BundleLayout, permission};

const LOCATIONS: &[ArtifactName] = &[
    ArtifactName::TerminfoDir,
    ArtifactName::LogoFile,
    ArtifactName::ShellIntegrationScript,
];

/// Data files and directories the application reads at runtime.
#[derive(Debug, Clone)]
pub struct LocationsCheck {
    layout: BundleLayout,
}

impl LocationsCheck {
    pub fn new(layout: BundleLayout) -> Self {
        Self { layout }
    }
}

impl Check for LocationsCheck {
    fn name(&self) -> &str {
        "filesystem_locations"
    }

    fn run(&self, ctx: &BuildContext) -> Vec<CheckOutcome> {
        LOCATIONS
            .iter()
            .map(|name| match locator::locate(name, &self.layout, ctx) {
                Ok(artifact) => permission::check(&artifact),
                Err(err) => CheckOutcome::failed(name.to_string(), &err),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlecheck_types::{Platform, Status};

    #[test]
    fn standard_package_layout_passes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pkg = dir.path().join("lib/kitty");
        std::fs::create_dir_all(pkg.join("terminfo/x")).expect("terminfo");
        std::fs::create_dir_all(pkg.join("logo")).expect("logo dir");
        std::fs::write(pkg.join("logo/kitty.png"), b"png").expect("logo");
        std::fs::create_dir_all(pkg.join("shell-integration")).expect("integration dir");
        std::fs::write(pkg.join("shell-integration/kitty.zsh"), b"# zsh").expect("script");

        let check = LocationsCheck::new(BundleLayout::new(dir.path(), "kitty"));
        let outcomes = check.run(&BuildContext::new(Platform::Linux));
        let failed: Vec<_> = outcomes.iter().filter(|o| o.status() != Status::Passed).collect();
        assert!(failed.is_empty(), "{failed:?}");
        assert_eq!(outcomes.len(), 3);
    }
}
