use bundlecheck_types::{BuildContext, CheckError, CheckOutcome};

use super::{Applicability, Check, frozen_only};
use crate::trust::TrustStore;

/// Frozen builds bundle enough trusted root certificates.
pub struct TrustStoreCheck {
    store: Box<dyn TrustStore>,
    /// Root count must be strictly greater than this.
    minimum: usize,
}

impl TrustStoreCheck {
    pub fn new(store: Box<dyn TrustStore>, minimum: usize) -> Self {
        Self { store, minimum }
    }

    fn verify(&self) -> Result<String, CheckError> {
        let count = self
            .store
            .root_count()
            .map_err(|source| CheckError::MissingBundledDependency {
                dependency: self.store.describe(),
                source,
            })?;
        if count <= self.minimum {
            return Err(CheckError::InsufficientTrustRoots {
                store: self.store.describe(),
                count,
                minimum: self.minimum,
            });
        }
        Ok(format!("{} holds {count} root certificates", self.store.describe()))
    }
}

impl Check for TrustStoreCheck {
    fn name(&self) -> &str {
        "trust_store"
    }

    fn applicability(&self, ctx: &BuildContext) -> Applicability {
        frozen_only(ctx)
    }

    fn run(&self, _ctx: &BuildContext) -> Vec<CheckOutcome> {
        vec![CheckOutcome::from_result(self.name(), self.verify())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlecheck_types::{LoadError, Platform, Status};

    struct Counted(usize);

    impl TrustStore for Counted {
        fn describe(&self) -> String {
            "test store".to_string()
        }

        fn root_count(&self) -> Result<usize, LoadError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl TrustStore for Broken {
        fn describe(&self) -> String {
            "broken store".to_string()
        }

        fn root_count(&self) -> Result<usize, LoadError> {
            Err(LoadError::NotFound("/b/cacert.pem".into()))
        }
    }

    fn frozen() -> BuildContext {
        BuildContext::new(Platform::Linux).with_frozen(true)
    }

    #[test]
    fn one_root_is_insufficient() {
        let outcomes = TrustStoreCheck::new(Box::new(Counted(1)), 2).run(&frozen());
        assert_eq!(outcomes[0].kind(), Some("InsufficientTrustRoots"));
    }

    #[test]
    fn threshold_is_strict() {
        let outcomes = TrustStoreCheck::new(Box::new(Counted(2)), 2).run(&frozen());
        assert_eq!(outcomes[0].status(), Status::Failed);
        let outcomes = TrustStoreCheck::new(Box::new(Counted(3)), 2).run(&frozen());
        assert_eq!(outcomes[0].status(), Status::Passed);
    }

    #[test]
    fn unreadable_store_is_missing_dependency() {
        let outcomes = TrustStoreCheck::new(Box::new(Broken), 2).run(&frozen());
        assert_eq!(outcomes[0].kind(), Some("MissingBundledDependency"));
        assert!(outcomes[0].message().contains("broken store"));
    }

    #[test]
    fn applies_only_when_frozen() {
        let check = TrustStoreCheck::new(Box::new(Counted(100)), 2);
        assert_eq!(check.applicability(&frozen()), Applicability::Applies);
        assert_eq!(
            check.applicability(&BuildContext::new(Platform::Linux)),
            Applicability::Skip(crate::checks::NOT_DISTRIBUTABLE.to_string())
        );
    }
}
