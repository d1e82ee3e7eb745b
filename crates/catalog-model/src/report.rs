//! Check outcomes and reports handed to the report aggregator.
//!
//! Every message is fully formatted for display. A check that did not run
//! because its prerequisite table was empty is reported as
//! [`CheckStatus::NotExecuted`], which is distinct from a check that ran and
//! found nothing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check ran and reported no errors (warnings may be present).
    Passed,
    /// The check ran and reported at least one error.
    Failed,
    /// The check was skipped because a required table was empty.
    NotExecuted,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
            CheckStatus::NotExecuted => "not executed",
        }
    }
}

/// Errors and warnings produced by a single check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn extend_errors<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.errors.extend(messages);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of one named check of one validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub validator: String,
    pub check: String,
    pub status: CheckStatus,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn from_outcome(
        validator: impl Into<String>,
        check: impl Into<String>,
        outcome: ValidationOutcome,
    ) -> Self {
        let status = if outcome.has_errors() {
            CheckStatus::Failed
        } else {
            CheckStatus::Passed
        };
        Self {
            validator: validator.into(),
            check: check.into(),
            status,
            errors: outcome.errors,
            warnings: outcome.warnings,
        }
    }

    pub fn not_executed(validator: impl Into<String>, check: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            check: check.into(),
            status: CheckStatus::NotExecuted,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn was_executed(&self) -> bool {
        self.status != CheckStatus::NotExecuted
    }

    /// Iterate messages with their severity, errors first.
    pub fn messages(&self) -> impl Iterator<Item = (IssueSeverity, &str)> {
        self.errors
            .iter()
            .map(|m| (IssueSeverity::Error, m.as_str()))
            .chain(
                self.warnings
                    .iter()
                    .map(|m| (IssueSeverity::Warning, m.as_str())),
            )
    }
}
