use std::fmt;

use serde::{Deserialize, Serialize};

/// The spreadsheets the composition checks read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadsheetKind {
    Description,
    Composition,
    Values,
    Proportionalities,
}

impl SpreadsheetKind {
    pub const ALL: [SpreadsheetKind; 4] = [
        SpreadsheetKind::Description,
        SpreadsheetKind::Composition,
        SpreadsheetKind::Values,
        SpreadsheetKind::Proportionalities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadsheetKind::Description => "description",
            SpreadsheetKind::Composition => "composition",
            SpreadsheetKind::Values => "values",
            SpreadsheetKind::Proportionalities => "proportionalities",
        }
    }

    /// Number of header rows in the sheet.
    pub fn header_rows(&self) -> usize {
        match self {
            SpreadsheetKind::Proportionalities => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for SpreadsheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
