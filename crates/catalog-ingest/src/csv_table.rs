use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame};

use catalog_model::SpreadsheetKind;

use crate::error::{IngestError, Result};
use crate::sheet::Spreadsheet;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Frame column names must be unique: blanks get a positional name and
/// repeats get a numeric suffix.
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("coluna_{}", idx + 1)
            } else {
                header
            };
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{base}_{count}")
            }
        })
        .collect()
}

/// Combine two header rows. Blank top cells continue the previous group,
/// which is how merged header cells come out of a spreadsheet export.
fn two_level_headers(top: &[String], sub: &[String]) -> Vec<(String, String)> {
    let width = top.len().max(sub.len());
    let mut current = String::new();
    (0..width)
        .map(|idx| {
            let top_cell = top.get(idx).map(|v| normalize_header(v)).unwrap_or_default();
            if !top_cell.is_empty() {
                current = top_cell;
            }
            let sub_cell = sub.get(idx).map(|v| normalize_header(v)).unwrap_or_default();
            (current.clone(), sub_cell)
        })
        .collect()
}

/// Read a CSV sheet into an all-string frame.
///
/// Fully blank rows are skipped. Proportionality sheets carry two header
/// rows; their columns are named `top::sub` and the pairs are kept in
/// [`Spreadsheet::header_groups`].
pub fn read_csv_sheet(path: &Path, kind: SpreadsheetKind, delimiter: u8) -> Result<Spreadsheet> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }

    let header_rows = kind.header_rows();
    if raw_rows.len() < header_rows {
        return Ok(Spreadsheet::new(kind, file_name, DataFrame::empty()));
    }

    let (headers, groups) = if header_rows == 2 {
        let groups = two_level_headers(&raw_rows[0], &raw_rows[1]);
        let names = groups
            .iter()
            .map(|(top, sub)| {
                if sub.is_empty() {
                    top.clone()
                } else {
                    format!("{top}::{sub}")
                }
            })
            .collect();
        (names, Some(groups))
    } else {
        let names = raw_rows[0].iter().map(|value| normalize_header(value)).collect();
        (names, None)
    };
    let headers = unique_headers(headers);

    let data_rows = &raw_rows[header_rows..];
    let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(data_rows.len()); headers.len()];
    for row in data_rows {
        for (idx, values) in columns.iter_mut().enumerate() {
            values.push(row.get(idx).cloned().unwrap_or_default());
        }
    }

    let frame = DataFrame::new(
        headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.as_str().into(), values))
            .collect(),
    )?;
    tracing::debug!(
        file = %file_name,
        kind = %kind,
        rows = frame.height(),
        columns = frame.width(),
        "read sheet"
    );

    let sheet = Spreadsheet::new(kind, file_name, frame);
    Ok(match groups {
        Some(groups) => sheet.with_header_groups(groups),
        None => sheet,
    })
}
