//! Composition hierarchy validation.
//!
//! The composition sheet lists `(parent, child)` code pairs that must form a
//! single rooted tree consistent with the levels and names in the
//! description sheet. Two strategies inspect it: [`tree`] walks an adjacency
//! map built from the rows, [`graph`] builds a directed graph and reasons
//! about components, subtrees and leaves.

mod graph;
mod messages;
mod tree;

use anyhow::Result;
use polars::prelude::DataFrame;

use catalog_graph::{CompositionEdge, LevelMap, normalize_code};
use catalog_ingest::{
    DatasetRegistry, Spreadsheet, check_required_columns, clean_integer_column, column_strings,
};
use catalog_model::{CheckReport, CompositionStrategy, SpreadsheetKind, ValidationConfig};

use crate::validator::Validator;

pub use graph::GraphStrategy;
pub use tree::TreeStrategy;

pub const VALIDATOR_NAME: &str = "composition";

/// Code of the implicit node above the root.
pub(crate) const SYNTHETIC_ROOT: &str = "0";

/// Runs the configured composition strategies over one dataset.
pub struct CompositionValidator<'a> {
    sheets: SheetSet<'a>,
    config: &'a ValidationConfig,
}

impl<'a> CompositionValidator<'a> {
    pub fn new(registry: &'a DatasetRegistry, config: &'a ValidationConfig) -> Self {
        Self {
            sheets: SheetSet::new(registry),
            config,
        }
    }

    /// Check names of a strategy, in run order.
    pub fn check_names(strategy: CompositionStrategy) -> &'static [&'static str] {
        match strategy {
            CompositionStrategy::Tree => TreeStrategy::CHECKS,
            CompositionStrategy::Graph => GraphStrategy::CHECKS,
        }
    }
}

impl Validator for CompositionValidator<'_> {
    fn name(&self) -> &'static str {
        VALIDATOR_NAME
    }

    fn run(&self) -> Vec<CheckReport> {
        let mut reports = Vec::new();
        let mut seen = Vec::new();
        for strategy in &self.config.strategies {
            if seen.contains(strategy) {
                continue;
            }
            seen.push(*strategy);
            let span = tracing::info_span!("strategy", strategy = strategy.as_str());
            let _guard = span.enter();
            match strategy {
                CompositionStrategy::Tree => {
                    reports.extend(TreeStrategy::new(self.sheets, self.config).run());
                }
                CompositionStrategy::Graph => {
                    let report_cleaning =
                        !self.config.runs(CompositionStrategy::Tree);
                    reports.extend(
                        GraphStrategy::new(self.sheets, self.config, report_cleaning).run(),
                    );
                }
            }
        }
        reports
    }
}

/// The four sheets as the checks see them. Missing entries read as empty.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SheetSet<'a> {
    registry: &'a DatasetRegistry,
}

impl<'a> SheetSet<'a> {
    fn new(registry: &'a DatasetRegistry) -> Self {
        Self { registry }
    }

    pub(crate) fn is_empty(&self, kind: SpreadsheetKind) -> bool {
        self.registry.is_empty(kind)
    }

    pub(crate) fn get(&self, kind: SpreadsheetKind) -> Option<&'a Spreadsheet> {
        self.registry.get(kind)
    }

    /// Sheet that an executing check requires. Callers test
    /// [`SheetSet::is_empty`] first, so absence is an internal error.
    pub(crate) fn require(&self, kind: SpreadsheetKind) -> Result<&'a Spreadsheet> {
        self.registry
            .get(kind)
            .ok_or_else(|| anyhow::anyhow!("sheet '{kind}' is not loaded"))
    }
}

/// Composition rows whose codes both passed cleaning.
#[derive(Debug, Clone, Default)]
pub(crate) struct CleanedComposition {
    pub edges: Vec<CompositionEdge>,
    pub errors: Vec<String>,
}

impl CleanedComposition {
    /// Every code used in a valid row, parents and children alike.
    pub(crate) fn codes(&self) -> impl Iterator<Item = &str> {
        self.edges
            .iter()
            .flat_map(|edge| [edge.parent.as_str(), edge.child.as_str()])
    }
}

/// Parents may be the synthetic root 0, children start at 1.
pub(crate) fn clean_composition(
    sheet: &Spreadsheet,
    config: &ValidationConfig,
) -> Result<CleanedComposition> {
    let columns = &config.schema.composition;
    let parents = clean_integer_column(&sheet.frame, &sheet.file_name, &columns.parent, 0)?;
    let children = clean_integer_column(&sheet.frame, &sheet.file_name, &columns.child, 1)?;

    let edges = parents
        .values
        .iter()
        .filter_map(|(row, parent)| {
            children
                .value_at(*row)
                .map(|child| CompositionEdge::new(*row, parent.to_string(), child.to_string()))
        })
        .collect();
    let mut errors = parents.errors;
    errors.extend(children.errors);
    Ok(CleanedComposition { edges, errors })
}

/// One description row with a valid code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DescriptionRow {
    pub row: usize,
    pub code: String,
    pub level: Option<i64>,
}

impl DescriptionRow {
    pub(crate) fn line(&self) -> usize {
        self.row + 2
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CleanedDescription {
    pub rows: Vec<DescriptionRow>,
    pub errors: Vec<String>,
}

impl CleanedDescription {
    /// Levels of rows whose code and level are both valid, plus the
    /// synthetic root at level 0 unless the sheet declares code 0 itself.
    pub(crate) fn level_map(&self) -> LevelMap {
        let mut levels: LevelMap = self
            .rows
            .iter()
            .filter_map(|row| row.level.map(|level| (row.code.clone(), level)))
            .collect();
        if !levels.contains(SYNTHETIC_ROOT) {
            levels.insert(SYNTHETIC_ROOT, 0);
        }
        levels
    }
}

/// Clean the code column and, when `with_levels` is set, the level column.
pub(crate) fn clean_description(
    sheet: &Spreadsheet,
    config: &ValidationConfig,
    with_levels: bool,
) -> Result<CleanedDescription> {
    let columns = &config.schema.description;
    let codes = clean_integer_column(&sheet.frame, &sheet.file_name, &columns.code, 1)?;
    let mut errors = codes.errors;

    let levels = if with_levels {
        let levels = clean_integer_column(&sheet.frame, &sheet.file_name, &columns.level, 1)?;
        errors.extend(levels.errors.iter().cloned());
        Some(levels)
    } else {
        None
    };

    let rows = codes
        .values
        .iter()
        .map(|(row, code)| DescriptionRow {
            row: *row,
            code: code.to_string(),
            level: levels.as_ref().and_then(|levels| levels.value_at(*row)),
        })
        .collect();
    Ok(CleanedDescription { rows, errors })
}

/// Missing-column messages for one sheet.
pub(crate) fn missing_columns(sheet: &Spreadsheet, columns: &[&str]) -> Vec<String> {
    check_required_columns(&sheet.frame, &sheet.file_name, columns)
}

/// Trimmed text of a column, indexed by data row.
pub(crate) fn text_column(frame: &DataFrame, column: &str) -> Result<Vec<String>> {
    Ok(column_strings(frame, column)?
        .into_iter()
        .map(|value| value.trim().to_string())
        .collect())
}

/// Leading code of a data header such as `12-2015`: the text before the
/// first `-`, normalised like any other code.
pub(crate) fn header_code(header: &str) -> Option<String> {
    let prefix = header.split('-').next().unwrap_or_default().trim();
    if prefix.is_empty() {
        None
    } else {
        Some(normalize_code(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_code_takes_prefix() {
        assert_eq!(header_code("12-2015").as_deref(), Some("12"));
        assert_eq!(header_code(" 7 - 2020").as_deref(), Some("7"));
        assert_eq!(header_code("id").as_deref(), Some("id"));
        assert_eq!(header_code("-2015"), None);
    }
}
