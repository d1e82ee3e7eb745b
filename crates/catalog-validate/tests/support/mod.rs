#![allow(dead_code)]

use polars::prelude::{Column, DataFrame};

use catalog_ingest::{DatasetRegistry, Spreadsheet};
use catalog_model::{CheckReport, CompositionStrategy, SpreadsheetKind, ValidationConfig};
use catalog_validate::{CompositionValidator, Validator};

pub fn make_df(columns: &[(&str, &[&str])]) -> DataFrame {
    DataFrame::new(
        columns
            .iter()
            .map(|(name, values)| Column::new((*name).into(), values.to_vec()))
            .collect(),
    )
    .expect("df")
}

/// Description rows as `(code, level, simple name, complete name)`.
pub fn description(rows: &[(&str, &str, &str, &str)]) -> Spreadsheet {
    let codes: Vec<&str> = rows.iter().map(|row| row.0).collect();
    let levels: Vec<&str> = rows.iter().map(|row| row.1).collect();
    let simple: Vec<&str> = rows.iter().map(|row| row.2).collect();
    let complete: Vec<&str> = rows.iter().map(|row| row.3).collect();
    Spreadsheet::new(
        SpreadsheetKind::Description,
        "descricao.csv",
        make_df(&[
            ("codigo", codes.as_slice()),
            ("nivel", levels.as_slice()),
            ("nome_simples", simple.as_slice()),
            ("nome_completo", complete.as_slice()),
        ]),
    )
}

/// Description with generated names, from `(code, level)` pairs.
pub fn levels(rows: &[(&str, &str)]) -> Spreadsheet {
    let named: Vec<(String, String)> = rows
        .iter()
        .map(|(code, _)| (format!("Indicador {code}"), format!("Indicador número {code}")))
        .collect();
    let full: Vec<(&str, &str, &str, &str)> = rows
        .iter()
        .zip(&named)
        .map(|((code, level), (simple, complete))| {
            (*code, *level, simple.as_str(), complete.as_str())
        })
        .collect();
    description(&full)
}

pub fn composition(pairs: &[(&str, &str)]) -> Spreadsheet {
    let parents: Vec<&str> = pairs.iter().map(|pair| pair.0).collect();
    let children: Vec<&str> = pairs.iter().map(|pair| pair.1).collect();
    Spreadsheet::new(
        SpreadsheetKind::Composition,
        "composicao.csv",
        make_df(&[
            ("codigo_pai", parents.as_slice()),
            ("codigo_filho", children.as_slice()),
        ]),
    )
}

/// A values sheet with the given data columns and one row.
pub fn values(headers: &[&str]) -> Spreadsheet {
    let columns: Vec<(&str, &[&str])> = headers
        .iter()
        .map(|header| (*header, &["1"][..]))
        .collect();
    Spreadsheet::new(SpreadsheetKind::Values, "valores.csv", make_df(&columns))
}

pub fn registry(sheets: Vec<Spreadsheet>) -> DatasetRegistry {
    sheets
        .into_iter()
        .fold(DatasetRegistry::new(), DatasetRegistry::with)
}

pub fn run(registry: &DatasetRegistry, strategy: CompositionStrategy) -> Vec<CheckReport> {
    let config = ValidationConfig::default().with_strategies(vec![strategy]);
    CompositionValidator::new(registry, &config).run()
}

pub fn report<'a>(reports: &'a [CheckReport], check: &str) -> &'a CheckReport {
    reports
        .iter()
        .find(|report| report.check == check)
        .unwrap_or_else(|| panic!("no report for {check}"))
}
