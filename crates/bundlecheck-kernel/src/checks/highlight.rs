use bundlecheck_types::{BuildContext, CheckError, CheckOutcome};

use super::{Applicability, Check, frozen_only};
use crate::Loadable;

/// Frozen builds ship an importable syntax-highlighting engine.
pub struct HighlightCheck {
    engine: String,
    loader: Box<dyn Loadable>,
}

impl HighlightCheck {
    pub fn new(engine: impl Into<String>, loader: Box<dyn Loadable>) -> Self {
        Self {
            engine: engine.into(),
            loader,
        }
    }
}

impl Check for HighlightCheck {
    fn name(&self) -> &str {
        "highlight_engine"
    }

    fn applicability(&self, ctx: &BuildContext) -> Applicability {
        frozen_only(ctx)
    }

    fn run(&self, _ctx: &BuildContext) -> Vec<CheckOutcome> {
        let result = self
            .loader
            .try_load(&self.engine)
            .map(|()| self.loader.describe(&self.engine))
            .map_err(|source| CheckError::MissingBundledDependency {
                dependency: self.engine.clone(),
                source,
            });
        vec![CheckOutcome::from_result(self.name(), result)]
    }
}
