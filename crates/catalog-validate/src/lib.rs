//! Checks over a loaded indicator catalog.
//!
//! Validators receive the sheets through a [`catalog_ingest::DatasetRegistry`]
//! and return one [`catalog_model::CheckReport`] per check. A check that
//! cannot run because a sheet is empty reports `NotExecuted`; a check that
//! fails internally reports a single unexpected-error message.

pub mod composition;
pub mod runner;
pub mod validator;

pub use composition::{CompositionValidator, GraphStrategy, TreeStrategy};
pub use runner::{CheckResult, run_check, unexpected_error_message};
pub use validator::{Validator, ValidatorKind, build_validators, run_validators};
