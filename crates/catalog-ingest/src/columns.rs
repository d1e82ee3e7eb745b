//! Column presence and column reads.

use polars::prelude::{AnyValue, Column, DataFrame};

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_string;

pub fn missing_column_message(file_name: &str, column: &str) -> String {
    format!(
        "{file_name}: A verificação foi abortada para a coluna obrigatória '{column}' que está ausente."
    )
}

/// Column whose header matches `column` once surrounding blanks are dropped.
fn find_column<'a>(frame: &'a DataFrame, column: &str) -> Option<&'a Column> {
    frame
        .get_columns()
        .iter()
        .find(|series| series.name().trim() == column)
}

/// One message per required column absent from `frame`, in `columns` order.
pub fn check_required_columns(frame: &DataFrame, file_name: &str, columns: &[&str]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| find_column(frame, column).is_none())
        .map(|column| missing_column_message(file_name, column))
        .collect()
}

/// Every cell of `column` as a trimmed string; nulls become empty strings.
pub fn column_strings(frame: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = find_column(frame, column).ok_or_else(|| IngestError::MissingColumn {
        column: column.to_string(),
    })?;
    let mut values = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_string(value).trim().to_string());
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_missing_column() {
        let frame = DataFrame::new(vec![Column::new("codigo".into(), ["1", "2"])]).expect("frame");
        let errors = check_required_columns(&frame, "descricao.csv", &["codigo", "nivel", "nome_simples"]);
        assert_eq!(
            errors,
            vec![
                "descricao.csv: A verificação foi abortada para a coluna obrigatória 'nivel' que está ausente.",
                "descricao.csv: A verificação foi abortada para a coluna obrigatória 'nome_simples' que está ausente.",
            ]
        );
    }

    #[test]
    fn reads_numeric_columns_as_strings() {
        let frame = DataFrame::new(vec![Column::new("nivel".into(), [1.0f64, 2.5])]).expect("frame");
        assert_eq!(column_strings(&frame, "nivel").expect("column"), vec!["1", "2.5"]);
        assert!(matches!(
            column_strings(&frame, "codigo"),
            Err(IngestError::MissingColumn { .. })
        ));
    }

    #[test]
    fn padded_headers_are_found_by_both_helpers() {
        let frame = DataFrame::new(vec![Column::new(" codigo ".into(), ["1", " 2 "])]).expect("frame");
        assert!(check_required_columns(&frame, "descricao.csv", &["codigo"]).is_empty());
        assert_eq!(column_strings(&frame, "codigo").expect("column"), vec!["1", "2"]);
    }
}
