use bundlecheck_types::{BuildContext, CheckError, CheckOutcome};

use super::Check;
use crate::Loadable;
use crate::registry::{PluginRegistry, PluginSource};

/// Required plugins are registered and the registry is not suspiciously small.
pub struct PluginsCheck {
    source: Box<dyn PluginSource>,
    required: Vec<String>,
    /// Registered count must be strictly greater than this.
    minimum: usize,
}

impl PluginsCheck {
    pub fn new(source: Box<dyn PluginSource>, required: Vec<String>, minimum: usize) -> Self {
        Self {
            source,
            required,
            minimum,
        }
    }

    /// Judge an already-populated registry.
    pub fn validate(&self, registry: &PluginRegistry) -> Result<String, CheckError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| registry.try_load(name).is_err())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(CheckError::MissingRequiredPlugin { names: missing });
        }

        let count = registry.len();
        if count <= self.minimum {
            return Err(CheckError::TooFewPlugins {
                count,
                minimum: self.minimum,
            });
        }

        Ok(format!("{count} plugins registered: {}", registry.names().join(", ")))
    }
}

impl Check for PluginsCheck {
    fn name(&self) -> &str {
        "plugin_registry"
    }

    fn run(&self, _ctx: &BuildContext) -> Vec<CheckOutcome> {
        let result = PluginRegistry::from_source(self.source.as_ref())
            .map_err(|source| CheckError::RegistryUnavailable { source })
            .and_then(|registry| self.validate(&registry));
        vec![CheckOutcome::from_result(self.name(), result)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlecheck_types::{LoadError, Platform, Status};

    struct Fixed(Vec<String>);

    impl PluginSource for Fixed {
        fn plugin_names(&self) -> Result<Vec<String>, LoadError> {
            Ok(self.0.clone())
        }
    }

    struct Unavailable;

    impl PluginSource for Unavailable {
        fn plugin_names(&self) -> Result<Vec<String>, LoadError> {
            Err(LoadError::NotFound("/b/kittens".into()))
        }
    }

    fn named(count: usize, extra: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = (0..count).map(|i| format!("tool{i}")).collect();
        names.extend(extra.iter().map(|s| s.to_string()));
        names
    }

    fn check(names: Vec<String>) -> PluginsCheck {
        PluginsCheck::new(
            Box::new(Fixed(names)),
            vec!["diff".to_string(), "hints".to_string()],
            8,
        )
    }

    fn run(check: &PluginsCheck) -> CheckOutcome {
        let mut outcomes = check.run(&BuildContext::new(Platform::Linux));
        assert_eq!(outcomes.len(), 1);
        outcomes.remove(0)
    }

    #[test]
    fn ten_names_with_required_pass() {
        let outcome = run(&check(named(8, &["diff", "hints"])));
        assert_eq!(outcome.status(), Status::Passed, "{}", outcome.message());
    }

    #[test]
    fn count_at_threshold_fails() {
        let outcome = run(&check(named(6, &["diff", "hints"])));
        assert_eq!(outcome.kind(), Some("TooFewPlugins"));
    }

    #[test]
    fn missing_required_is_named() {
        let outcome = run(&check(named(12, &["diff"])));
        assert_eq!(outcome.kind(), Some("MissingRequiredPlugin"));
        assert!(outcome.message().contains("hints"));
        assert!(!outcome.message().contains("diff,"));
    }

    #[test]
    fn unavailable_registry_fails() {
        let check = PluginsCheck::new(Box::new(Unavailable), vec![], 0);
        assert_eq!(run(&check).kind(), Some("RegistryUnavailable"));
    }
}
