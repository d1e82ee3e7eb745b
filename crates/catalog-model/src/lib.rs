pub mod config;
pub mod error;
pub mod report;
pub mod sheet;

pub use config::{
    ColumnSchema, CompositionColumns, CompositionStrategy, DatasetFiles, DescriptionColumns,
    LevelStepPolicy, ValidationConfig,
};
pub use error::{CatalogError, Result};
pub use report::{CheckReport, CheckStatus, IssueSeverity, ValidationOutcome};
pub use sheet::SpreadsheetKind;
