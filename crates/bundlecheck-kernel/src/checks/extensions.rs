use bundlecheck_types::{BuildContext, CheckError, CheckOutcome};

use super::Check;
use crate::Loadable;
use crate::loadable::load_each;

/// Every native extension module loads; one outcome per module.
pub struct ExtensionsCheck {
    modules: Vec<String>,
    loader: Box<dyn Loadable>,
}

impl ExtensionsCheck {
    pub fn new(modules: Vec<String>, loader: Box<dyn Loadable>) -> Self {
        Self { modules, loader }
    }
}

impl Check for ExtensionsCheck {
    fn name(&self) -> &str {
        "extensions"
    }

    fn run(&self, _ctx: &BuildContext) -> Vec<CheckOutcome> {
        load_each("extension", self.loader.as_ref(), &self.modules, |module, source| {
            CheckError::ExtensionLoadFailure {
                module: module.to_string(),
                source,
            }
        })
    }
}
