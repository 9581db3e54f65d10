use bundlecheck_types::{BuildArtifact, BuildContext, CheckError, CheckOutcome};

use super::Check;
use crate::locator::{self, ArtifactName};
use crate::{BundleLayout, permission};

/// The main executable exists, is executable, and is named after the app.
#[derive(Debug, Clone)]
pub struct ExecutableCheck {
    layout: BundleLayout,
}

impl ExecutableCheck {
    pub fn new(layout: BundleLayout) -> Self {
        Self { layout }
    }

    fn verify(&self, artifact: &BuildArtifact) -> Result<String, CheckError> {
        let message = permission::verify(artifact)?;
        let named = artifact
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains(self.layout.app_name()));
        if !named {
            return Err(CheckError::UnexpectedArtifactName {
                name: artifact.name().to_string(),
                path: artifact.path().to_path_buf(),
                expected: self.layout.app_name().to_string(),
            });
        }
        Ok(message)
    }
}

impl Check for ExecutableCheck {
    fn name(&self) -> &str {
        "executable"
    }

    fn run(&self, ctx: &BuildContext) -> Vec<CheckOutcome> {
        let name = ArtifactName::MainExecutable;
        let outcome = match locator::locate(&name, &self.layout, ctx) {
            Ok(artifact) => CheckOutcome::from_result(artifact.name(), self.verify(&artifact)),
            Err(err) => CheckOutcome::failed(name.to_string(), &err),
        };
        vec![outcome]
    }
}
