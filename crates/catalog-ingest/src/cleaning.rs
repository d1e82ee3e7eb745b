//! Integer coercion of code and level columns.
//!
//! Rows whose cell cannot be read as an integer at or above a minimum are
//! dropped from the result and reported with their spreadsheet line number
//! (data row index + 2, the header being line 1).

use polars::prelude::DataFrame;

use crate::columns::column_strings;
use crate::error::Result;
use crate::polars_utils::parse_integer;

/// Valid `(row, value)` pairs of a column plus one message per dropped row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedColumn {
    pub values: Vec<(usize, i64)>,
    pub errors: Vec<String>,
}

impl CleanedColumn {
    pub fn value_at(&self, row: usize) -> Option<i64> {
        self.values
            .binary_search_by_key(&row, |(r, _)| *r)
            .ok()
            .map(|pos| self.values[pos].1)
    }
}

/// Coerce `column` to integers no smaller than `min`.
pub fn clean_integer_column(
    frame: &DataFrame,
    file_name: &str,
    column: &str,
    min: i64,
) -> Result<CleanedColumn> {
    let cells = column_strings(frame, column)?;
    let mut cleaned = CleanedColumn::default();

    for (row, cell) in cells.iter().enumerate() {
        let reason = if cell.is_empty() {
            Some("o valor está vazio".to_string())
        } else {
            match parse_integer(cell) {
                None => Some(format!("'{cell}' não é um número inteiro")),
                Some(value) if value < min => Some(format!(
                    "o valor {value} é menor que o mínimo permitido ({min})"
                )),
                Some(value) => {
                    cleaned.values.push((row, value));
                    None
                }
            }
        };
        if let Some(reason) = reason {
            cleaned.errors.push(format!(
                "{file_name}, linha {}: A coluna '{column}' contém um valor inválido: {reason}.",
                row + 2
            ));
        }
    }

    if !cleaned.errors.is_empty() {
        tracing::debug!(
            file = file_name,
            column,
            dropped = cleaned.errors.len(),
            "dropped rows with invalid integers"
        );
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    #[test]
    fn drops_invalid_rows_with_line_numbers() {
        let frame = DataFrame::new(vec![Column::new(
            "codigo_pai".into(),
            ["0", "1,0", "", "x", "-1", "2.5"],
        )])
        .expect("frame");

        let cleaned = clean_integer_column(&frame, "composicao.csv", "codigo_pai", 0).expect("clean");
        assert_eq!(cleaned.values, vec![(0, 0), (1, 1)]);
        assert_eq!(
            cleaned.errors,
            vec![
                "composicao.csv, linha 4: A coluna 'codigo_pai' contém um valor inválido: o valor está vazio.",
                "composicao.csv, linha 5: A coluna 'codigo_pai' contém um valor inválido: 'x' não é um número inteiro.",
                "composicao.csv, linha 6: A coluna 'codigo_pai' contém um valor inválido: o valor -1 é menor que o mínimo permitido (0).",
                "composicao.csv, linha 7: A coluna 'codigo_pai' contém um valor inválido: '2.5' não é um número inteiro.",
            ]
        );
        assert_eq!(cleaned.value_at(1), Some(1));
        assert_eq!(cleaned.value_at(2), None);
    }

    #[test]
    fn minimum_one_rejects_zero() {
        let frame = DataFrame::new(vec![Column::new("codigo".into(), [0i64, 3])]).expect("frame");
        let cleaned = clean_integer_column(&frame, "descricao.csv", "codigo", 1).expect("clean");
        assert_eq!(cleaned.values, vec![(1, 3)]);
        assert_eq!(cleaned.errors.len(), 1);
    }
}
