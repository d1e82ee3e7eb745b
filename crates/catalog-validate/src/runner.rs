//! Failure isolation around individual checks.
//!
//! A check that returns an error or panics becomes a `Failed` report with a
//! single "unexpected error" message; the remaining checks still run.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{info_span, warn};

use catalog_model::{CheckReport, ValidationOutcome};

/// What a check body produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Completed(ValidationOutcome),
    /// A table the check depends on is empty.
    NotExecuted,
}

impl From<ValidationOutcome> for CheckResult {
    fn from(outcome: ValidationOutcome) -> Self {
        CheckResult::Completed(outcome)
    }
}

pub fn unexpected_error_message(check: &str, detail: &str) -> String {
    format!("Erro inesperado na verificação '{check}': {detail}")
}

/// Run one check body and turn whatever happens into a [`CheckReport`].
pub fn run_check<F>(validator: &str, check: &str, body: F) -> CheckReport
where
    F: FnOnce() -> anyhow::Result<CheckResult>,
{
    let span = info_span!("check", validator, check);
    let _guard = span.enter();

    let detail = match catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(CheckResult::Completed(outcome))) => {
            tracing::debug!(
                errors = outcome.errors.len(),
                warnings = outcome.warnings.len(),
                "check finished"
            );
            return CheckReport::from_outcome(validator, check, outcome);
        }
        Ok(Ok(CheckResult::NotExecuted)) => {
            tracing::info!("check skipped, required sheet is empty");
            return CheckReport::not_executed(validator, check);
        }
        Ok(Err(error)) => format!("{error:#}"),
        Err(payload) => panic_payload_to_string(payload.as_ref()),
    };

    warn!(%detail, "check aborted");
    CheckReport::from_outcome(
        validator,
        check,
        ValidationOutcome::from_errors(vec![unexpected_error_message(check, &detail)]),
    )
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "panic".to_string()
    }
}
