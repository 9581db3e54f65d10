//! CheckOutcome: the result of a single check.

use std::fmt;

use serde::Serialize;

use crate::CheckError;

/// Whether a check passed, failed, or did not apply to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    /// Never counts toward failure.
    Skipped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
        })
    }
}

/// One check's verdict.
///
/// `check` names what was checked (e.g. `backend:x11`, `shader:cell`),
/// `message` says what was found or why it was skipped, and `kind` carries
/// the [`CheckError::kind`] of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    check: String,
    status: Status,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl CheckOutcome {
    pub fn passed(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status: Status::Passed,
            message: message.into(),
            kind: None,
        }
    }

    pub fn failed(check: impl Into<String>, error: &CheckError) -> Self {
        Self {
            check: check.into(),
            status: Status::Failed,
            message: error.to_string(),
            kind: Some(error.kind()),
        }
    }

    pub fn skipped(check: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status: Status::Skipped,
            message: reason.into(),
            kind: None,
        }
    }

    /// Build an outcome from a check body's result.
    pub fn from_result(check: impl Into<String>, result: Result<String, CheckError>) -> Self {
        match result {
            Ok(message) => Self::passed(check, message),
            Err(err) => Self::failed(check, &err),
        }
    }

    pub fn check(&self) -> &str {
        &self.check
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> Option<&'static str> {
        self.kind
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == Status::Skipped
    }
}
