pub mod cleaning;
pub mod columns;
pub mod csv_table;
pub mod dataset;
pub mod error;
pub mod polars_utils;
pub mod sheet;

pub use cleaning::{CleanedColumn, clean_integer_column};
pub use columns::{check_required_columns, column_strings, missing_column_message};
pub use csv_table::read_csv_sheet;
pub use dataset::load_dataset;
pub use error::{IngestError, Result};
pub use polars_utils::{any_to_string, format_numeric, parse_integer};
pub use sheet::{DatasetRegistry, Spreadsheet};
