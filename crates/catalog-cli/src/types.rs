use std::path::PathBuf;

use serde::Serialize;

use catalog_model::{CheckReport, CompositionStrategy, SpreadsheetKind};

/// Options of one `validate` run, independent of how they were parsed.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub folder: PathBuf,
    pub config_path: Option<PathBuf>,
    /// Replaces the strategies from the configuration when set.
    pub strategies: Option<Vec<CompositionStrategy>>,
    pub strict_levels: bool,
    pub json_output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub kind: SpreadsheetKind,
    pub file_name: String,
    pub exists: bool,
    pub read_ok: bool,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct ValidationRun {
    pub folder: PathBuf,
    pub sheets: Vec<SheetSummary>,
    pub reports: Vec<CheckReport>,
    pub has_errors: bool,
}

impl ValidationRun {
    pub fn error_count(&self) -> usize {
        self.reports.iter().map(CheckReport::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.reports.iter().map(CheckReport::warning_count).sum()
    }
}
