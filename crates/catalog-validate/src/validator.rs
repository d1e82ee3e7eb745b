//! Validator capability and the typed registry of validators.

use std::collections::BTreeMap;

use catalog_ingest::DatasetRegistry;
use catalog_model::{CheckReport, ValidationConfig};

use crate::composition::CompositionValidator;

/// A group of checks over one loaded dataset.
pub trait Validator {
    fn name(&self) -> &'static str;

    /// Run every check. Failures inside a check are reported, never raised.
    fn run(&self) -> Vec<CheckReport>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidatorKind {
    Composition,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 1] = [ValidatorKind::Composition];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Composition => "composition",
        }
    }
}

/// Instantiate every validator over `registry`.
pub fn build_validators<'a>(
    registry: &'a DatasetRegistry,
    config: &'a ValidationConfig,
) -> BTreeMap<ValidatorKind, Box<dyn Validator + 'a>> {
    let mut validators: BTreeMap<ValidatorKind, Box<dyn Validator + 'a>> = BTreeMap::new();
    for kind in ValidatorKind::ALL {
        let validator: Box<dyn Validator + 'a> = match kind {
            ValidatorKind::Composition => Box::new(CompositionValidator::new(registry, config)),
        };
        validators.insert(kind, validator);
    }
    validators
}

/// Run every validator in kind order and collect their reports.
pub fn run_validators(registry: &DatasetRegistry, config: &ValidationConfig) -> Vec<CheckReport> {
    build_validators(registry, config)
        .values()
        .flat_map(|validator| {
            let span = tracing::info_span!("validator", name = validator.name());
            let _guard = span.enter();
            validator.run()
        })
        .collect()
}
