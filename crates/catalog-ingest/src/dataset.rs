//! Loading the catalog sheets from an input folder.

use std::path::Path;

use catalog_model::{SpreadsheetKind, ValidationConfig};

use crate::csv_table::read_csv_sheet;
use crate::error::{IngestError, Result};
use crate::sheet::{DatasetRegistry, Spreadsheet};

/// Load every sheet named in the configuration from `folder`.
///
/// A missing folder is the only hard failure. A missing file is recorded as
/// a sheet with `exists = false` and an unparsable one with
/// `read_ok = false`; both reach the validators as empty sheets.
pub fn load_dataset(folder: &Path, config: &ValidationConfig) -> Result<DatasetRegistry> {
    if !folder.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: folder.to_path_buf(),
        });
    }

    let delimiter = u8::try_from(config.delimiter).unwrap_or(b',');
    let mut registry = DatasetRegistry::new();
    for kind in SpreadsheetKind::ALL {
        let file_name = config.files.file_name(kind);
        let path = folder.join(file_name);
        let sheet = if !path.is_file() {
            tracing::warn!(sheet = %kind, file = file_name, "sheet not found");
            Spreadsheet::missing(kind, file_name)
        } else {
            match read_csv_sheet(&path, kind, delimiter) {
                Ok(sheet) => sheet,
                Err(error) => {
                    tracing::warn!(sheet = %kind, file = file_name, %error, "sheet could not be read");
                    Spreadsheet::unreadable(kind, file_name)
                }
            }
        };
        registry.insert(sheet);
    }
    Ok(registry)
}
