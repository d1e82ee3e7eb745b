//! Adjacency-tree strategy.

use anyhow::Result;

use catalog_graph::{build_tree, detect_in_tree, format_cycle_path, validate_level_hierarchy};
use catalog_model::{CheckReport, SpreadsheetKind, ValidationConfig, ValidationOutcome};

use super::{
    SheetSet, VALIDATOR_NAME, clean_composition, clean_description, messages, missing_columns,
};
use crate::runner::{CheckResult, run_check};

const HIERARCHY: &str = "validate_hierarchy_with_tree";
const SIBLING_LEVELS: &str = "validate_tree_levels_children";

pub struct TreeStrategy<'a> {
    sheets: SheetSet<'a>,
    config: &'a ValidationConfig,
}

impl<'a> TreeStrategy<'a> {
    pub const CHECKS: &'static [&'static str] = &[HIERARCHY, SIBLING_LEVELS];

    pub(crate) fn new(sheets: SheetSet<'a>, config: &'a ValidationConfig) -> Self {
        Self { sheets, config }
    }

    pub fn run(&self) -> Vec<CheckReport> {
        vec![
            run_check(VALIDATOR_NAME, HIERARCHY, || self.hierarchy()),
            run_check(VALIDATOR_NAME, SIBLING_LEVELS, || self.sibling_levels()),
        ]
    }

    fn inputs_empty(&self) -> bool {
        self.sheets.is_empty(SpreadsheetKind::Composition)
            || self.sheets.is_empty(SpreadsheetKind::Description)
    }

    fn required_column_errors(&self) -> Result<Vec<String>> {
        let composition = self.sheets.require(SpreadsheetKind::Composition)?;
        let description = self.sheets.require(SpreadsheetKind::Description)?;
        let schema = &self.config.schema;
        let mut errors = missing_columns(
            composition,
            &[
                schema.composition.parent.as_str(),
                schema.composition.child.as_str(),
            ],
        );
        errors.extend(missing_columns(
            description,
            &[
                schema.description.code.as_str(),
                schema.description.level.as_str(),
            ],
        ));
        Ok(errors)
    }

    /// Cycles, parent/child level ordering and codes without a level.
    fn hierarchy(&self) -> Result<CheckResult> {
        if self.inputs_empty() {
            return Ok(CheckResult::NotExecuted);
        }
        let missing = self.required_column_errors()?;
        if !missing.is_empty() {
            return Ok(ValidationOutcome::from_errors(missing).into());
        }

        let composition = self.sheets.require(SpreadsheetKind::Composition)?;
        let description = self.sheets.require(SpreadsheetKind::Description)?;
        let comp_file = composition.file_name.as_str();

        let cleaned = clean_composition(composition, self.config)?;
        let described = clean_description(description, self.config, true)?;
        let mut outcome = ValidationOutcome::new();
        outcome.extend_errors(cleaned.errors.iter().cloned());
        outcome.extend_errors(described.errors.iter().cloned());

        let levels = described.level_map();
        let tree = build_tree(&cleaned.edges);
        if let Some(cycle) = detect_in_tree(&tree) {
            outcome.push_error(messages::cycle_found(comp_file, &format_cycle_path(&cycle)));
        }

        let policy = self.config.level_policy;
        let violations = validate_level_hierarchy(&cleaned.edges, &levels, |parent, child| {
            policy.accepts(parent, child)
        });
        for violation in &violations {
            let line = violation.row + 2;
            let message = match violation.pair() {
                (Some(parent), Some(child)) => messages::level_order(
                    comp_file,
                    line,
                    parent,
                    levels.get(parent).unwrap_or_default(),
                    child,
                    levels.get(child).unwrap_or_default(),
                ),
                (Some(parent), None) => messages::parent_without_level(comp_file, line, parent),
                (None, Some(child)) => messages::child_without_level(comp_file, line, child),
                (None, None) => continue,
            };
            outcome.push_error(message);
        }

        tracing::debug!(
            edges = cleaned.edges.len(),
            levels = levels.len(),
            violations = violations.len(),
            "tree hierarchy checked"
        );
        Ok(outcome.into())
    }

    /// Children of one parent must all share a level.
    fn sibling_levels(&self) -> Result<CheckResult> {
        if self.inputs_empty() {
            return Ok(CheckResult::NotExecuted);
        }
        let missing = self.required_column_errors()?;
        if !missing.is_empty() {
            return Ok(ValidationOutcome::from_errors(missing).into());
        }

        let composition = self.sheets.require(SpreadsheetKind::Composition)?;
        let description = self.sheets.require(SpreadsheetKind::Description)?;
        let desc_file = description.file_name.as_str();

        let cleaned = clean_composition(composition, self.config)?;
        let levels = clean_description(description, self.config, true)?.level_map();
        let tree = build_tree(&cleaned.edges);

        let mut outcome = ValidationOutcome::new();
        for parent in tree.parents() {
            if !levels.contains(parent) {
                outcome.push_error(messages::parent_not_found(desc_file, parent));
                continue;
            }

            let mut children: Vec<(String, i64)> = Vec::new();
            for child in tree.children(parent) {
                if children.iter().any(|(seen, _)| seen == child) {
                    continue;
                }
                if let Some(level) = levels.get(child) {
                    children.push((child.clone(), level));
                }
            }

            let first_level = children.first().map(|(_, level)| *level);
            if children.iter().any(|(_, level)| Some(*level) != first_level) {
                outcome.push_error(messages::children_levels_differ(
                    desc_file, parent, &children,
                ));
            }
        }
        Ok(outcome.into())
    }
}
