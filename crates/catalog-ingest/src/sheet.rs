use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use catalog_model::SpreadsheetKind;

/// One loaded spreadsheet as handed to the validators.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    pub kind: SpreadsheetKind,
    /// File name used as the prefix of every message about this sheet.
    pub file_name: String,
    pub exists: bool,
    pub read_ok: bool,
    pub frame: DataFrame,
    /// `(top, sub)` header pair of every column for sheets with two header
    /// rows. Frame columns are then named `top::sub`.
    pub header_groups: Option<Vec<(String, String)>>,
}

impl Spreadsheet {
    pub fn new(kind: SpreadsheetKind, file_name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            exists: true,
            read_ok: true,
            frame,
            header_groups: None,
        }
    }

    /// A sheet whose file is absent from the input folder.
    pub fn missing(kind: SpreadsheetKind, file_name: impl Into<String>) -> Self {
        Self {
            exists: false,
            read_ok: false,
            ..Self::new(kind, file_name, DataFrame::empty())
        }
    }

    /// A sheet whose file exists but could not be parsed.
    pub fn unreadable(kind: SpreadsheetKind, file_name: impl Into<String>) -> Self {
        Self {
            read_ok: false,
            ..Self::new(kind, file_name, DataFrame::empty())
        }
    }

    #[must_use]
    pub fn with_header_groups(mut self, groups: Vec<(String, String)>) -> Self {
        self.header_groups = Some(groups);
        self
    }

    /// True when the sheet holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Header texts of every column: both levels for two-row headers, the
    /// column name otherwise.
    pub fn header_texts(&self) -> Vec<String> {
        match &self.header_groups {
            Some(groups) => groups
                .iter()
                .flat_map(|(top, sub)| [top.clone(), sub.clone()])
                .filter(|text| !text.trim().is_empty())
                .collect(),
            None => self.column_names(),
        }
    }
}

/// Loaded sheets keyed by kind.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    sheets: BTreeMap<SpreadsheetKind, Spreadsheet>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: Spreadsheet) {
        self.sheets.insert(sheet.kind, sheet);
    }

    #[must_use]
    pub fn with(mut self, sheet: Spreadsheet) -> Self {
        self.insert(sheet);
        self
    }

    pub fn get(&self, kind: SpreadsheetKind) -> Option<&Spreadsheet> {
        self.sheets.get(&kind)
    }

    /// True when the sheet is absent or has no data rows.
    pub fn is_empty(&self, kind: SpreadsheetKind) -> bool {
        self.get(kind).is_none_or(Spreadsheet::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spreadsheet> {
        self.sheets.values()
    }
}
