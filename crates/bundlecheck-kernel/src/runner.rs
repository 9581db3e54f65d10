//! Runner: executes every check once and aggregates outcomes.
//!
//! Fail-collect, never fail-fast: a failing or panicking check is recorded
//! and the run continues, so one run reports every problem. The run fails
//! iff at least one outcome failed; skips never count.

use std::panic::{self, AssertUnwindSafe};

use bundlecheck_types::{BuildContext, CheckError, CheckOutcome, Status};
use serde::Serialize;

use crate::checks::{Applicability, Check};
use crate::{HarnessConfig, SuiteBuilder};

/// Outcomes of one run, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    context: BuildContext,
    outcomes: Vec<CheckOutcome>,
}

impl RunReport {
    pub fn new(context: BuildContext, outcomes: Vec<CheckOutcome>) -> Self {
        Self { context, outcomes }
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn count(&self, status: Status) -> usize {
        self.outcomes.iter().filter(|o| o.status() == status).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Runs an ordered list of checks.
pub struct Runner {
    checks: Vec<Box<dyn Check>>,
}

impl Runner {
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    /// The standard suite for `config`.
    pub fn standard(config: &HarnessConfig, ctx: BuildContext) -> Self {
        Self::new(SuiteBuilder::new(config, ctx).build())
    }

    pub fn run(&self, ctx: &BuildContext) -> RunReport {
        let mut outcomes = Vec::new();

        for check in &self.checks {
            let name = check.name();
            if let Applicability::Skip(reason) = check.applicability(ctx) {
                tracing::debug!(check = name, %reason, "skipping check");
                outcomes.push(CheckOutcome::skipped(name, reason));
                continue;
            }

            tracing::debug!(check = name, "running check");
            let produced = match panic::catch_unwind(AssertUnwindSafe(|| check.run(ctx))) {
                Ok(produced) => produced,
                Err(payload) => {
                    let err = CheckError::InternalDefect(panic_message(payload.as_ref()));
                    vec![CheckOutcome::failed(name, &err)]
                }
            };

            for outcome in &produced {
                if outcome.is_failed() {
                    tracing::warn!(check = outcome.check(), detail = outcome.message(), "check failed");
                }
            }
            outcomes.extend(produced);
        }

        let report = RunReport::new(*ctx, outcomes);
        tracing::info!(
            passed = report.count(Status::Passed),
            failed = report.count(Status::Failed),
            skipped = report.count(Status::Skipped),
            "run complete"
        );
        report
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::frozen_only;
    use bundlecheck_types::Platform;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixed {
        name: &'static str,
        outcomes: Vec<CheckOutcome>,
        frozen_only: bool,
        calls: Rc<Cell<usize>>,
    }

    impl Fixed {
        fn new(name: &'static str, outcomes: Vec<CheckOutcome>) -> Self {
            Self {
                name,
                outcomes,
                frozen_only: false,
                calls: Rc::new(Cell::new(0)),
            }
        }
    }

    impl Check for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn applicability(&self, ctx: &BuildContext) -> Applicability {
            if self.frozen_only {
                frozen_only(ctx)
            } else {
                Applicability::Applies
            }
        }

        fn run(&self, _ctx: &BuildContext) -> Vec<CheckOutcome> {
            self.calls.set(self.calls.get() + 1);
            self.outcomes.clone()
        }
    }

    struct Panics;

    impl Check for Panics {
        fn name(&self) -> &str {
            "panics"
        }

        fn run(&self, _ctx: &BuildContext) -> Vec<CheckOutcome> {
            panic!("locator bug");
        }
    }

    fn ctx() -> BuildContext {
        BuildContext::new(Platform::Linux)
    }

    fn failure(name: &str) -> CheckOutcome {
        CheckOutcome::failed(name, &CheckError::InternalDefect("x".into()))
    }

    #[test]
    fn failure_does_not_stop_the_run() {
        let runner = Runner::new(vec![
            Box::new(Fixed::new("a", vec![failure("a")])),
            Box::new(Fixed::new("b", vec![CheckOutcome::passed("b", "ok")])),
        ]);
        let report = runner.run(&ctx());
        assert_eq!(report.outcomes().len(), 2);
        assert_eq!(report.count(Status::Failed), 1);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn skips_do_not_fail_the_run() {
        let runner = Runner::new(vec![
            Box::new(Fixed::new("a", vec![CheckOutcome::passed("a", "ok")])),
            Box::new(Fixed::new("b", vec![CheckOutcome::skipped("b", "n/a")])),
        ]);
        let report = runner.run(&ctx());
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn inapplicable_check_body_never_runs() {
        let mut check = Fixed::new("trust_store", vec![failure("trust_store")]);
        check.frozen_only = true;
        let calls = check.calls.clone();

        let report = Runner::new(vec![Box::new(check)]).run(&ctx());
        assert_eq!(calls.get(), 0);
        assert_eq!(report.outcomes()[0].status(), Status::Skipped);
        assert_eq!(report.outcomes()[0].message(), "not a distributable build");
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn panicking_check_becomes_internal_defect() {
        let runner = Runner::new(vec![
            Box::new(Panics),
            Box::new(Fixed::new("after", vec![CheckOutcome::passed("after", "ok")])),
        ]);
        let report = runner.run(&ctx());
        assert_eq!(report.outcomes().len(), 2);
        assert_eq!(report.outcomes()[0].kind(), Some("InternalDefect"));
        assert!(report.outcomes()[0].message().contains("locator bug"));
        assert_eq!(report.outcomes()[1].status(), Status::Passed);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn every_check_runs_exactly_once() {
        let a = Fixed::new("a", vec![]);
        let b = Fixed::new("b", vec![]);
        let (ca, cb) = (a.calls.clone(), b.calls.clone());
        Runner::new(vec![Box::new(a), Box::new(b)]).run(&ctx());
        assert_eq!((ca.get(), cb.get()), (1, 1));
    }

    #[test]
    fn empty_run_succeeds() {
        let report = Runner::new(vec![]).run(&ctx());
        assert!(report.outcomes().is_empty());
        assert_eq!(report.exit_code(), 0);
    }
}
