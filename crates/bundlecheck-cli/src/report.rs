//! Report rendering.
//!
//! Text output reads like a unit test run: one line per outcome, failure
//! details indented beneath, then a summary and a final verdict. JSON output
//! carries the same information for CI tooling.

use std::io::{self, Write};

use bundlecheck_kernel::RunReport;
use bundlecheck_types::{BuildContext, CheckOutcome, Status};
use owo_colors::OwoColorize;
use serde::Serialize;

const SEPARATOR: &str =
    "----------------------------------------------------------------------";

/// Text renderer.
#[derive(Debug, Clone, Copy)]
pub struct TextReport {
    color: bool,
}

impl TextReport {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
        for outcome in report.outcomes() {
            self.render_outcome(outcome, out)?;
        }

        let (passed, failed, skipped) = counts(report);
        writeln!(out, "{SEPARATOR}")?;
        let ran = report.outcomes().len();
        let noun = if ran == 1 { "check" } else { "checks" };
        writeln!(
            out,
            "Ran {ran} {noun}: {passed} passed, {failed} failed, {skipped} skipped"
        )?;

        if failed == 0 {
            writeln!(out, "{}", self.paint("OK", Status::Passed))
        } else {
            let mut verdict = format!("FAILED (failures={failed}");
            if skipped > 0 {
                verdict.push_str(&format!(", skipped={skipped}"));
            }
            verdict.push(')');
            writeln!(out, "{}", self.paint(&verdict, Status::Failed))
        }
    }

    fn render_outcome(&self, outcome: &CheckOutcome, out: &mut dyn Write) -> io::Result<()> {
        match outcome.status() {
            Status::Passed => {
                writeln!(out, "{} ... {}", outcome.check(), self.paint("ok", Status::Passed))
            }
            Status::Skipped => writeln!(
                out,
                "{} ... {} '{}'",
                outcome.check(),
                self.paint("skipped", Status::Skipped),
                outcome.message()
            ),
            Status::Failed => {
                writeln!(out, "{} ... {}", outcome.check(), self.paint("FAIL", Status::Failed))?;
                for line in outcome.message().lines() {
                    writeln!(out, "    {line}")?;
                }
                Ok(())
            }
        }
    }

    fn paint(&self, text: &str, status: Status) -> String {
        if !self.color {
            return text.to_string();
        }
        match status {
            Status::Passed => text.green().to_string(),
            Status::Failed => text.red().bold().to_string(),
            Status::Skipped => text.yellow().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    passed: usize,
    failed: usize,
    skipped: usize,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    context: &'a BuildContext,
    outcomes: &'a [CheckOutcome],
    summary: Summary,
    exit_code: i32,
}

/// Write the report as a single pretty-printed JSON document.
pub fn render_json(report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
    let (passed, failed, skipped) = counts(report);
    let doc = JsonReport {
        context: report.context(),
        outcomes: report.outcomes(),
        summary: Summary {
            passed,
            failed,
            skipped,
        },
        exit_code: report.exit_code(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}

fn counts(report: &RunReport) -> (usize, usize, usize) {
    (
        report.count(Status::Passed),
        report.count(Status::Failed),
        report.count(Status::Skipped),
    )
}
