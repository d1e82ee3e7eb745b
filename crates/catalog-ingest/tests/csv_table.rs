use std::fs;
use std::path::PathBuf;

use catalog_ingest::{column_strings, read_csv_sheet};
use catalog_model::SpreadsheetKind;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_single_header_sheet() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        &dir,
        "descricao.csv",
        "\u{feff}codigo, nivel ,nome_simples\n1,1,Raiz\n\n2,2,Filho\n,,\n",
    );

    let sheet = read_csv_sheet(&path, SpreadsheetKind::Description, b',').expect("read csv");
    assert_eq!(sheet.file_name, "descricao.csv");
    assert!(sheet.exists && sheet.read_ok);
    assert_eq!(sheet.column_names(), vec!["codigo", "nivel", "nome_simples"]);
    assert_eq!(sheet.frame.height(), 2);
    assert_eq!(
        column_strings(&sheet.frame, "nome_simples").expect("column"),
        vec!["Raiz", "Filho"]
    );
    assert!(sheet.header_groups.is_none());
}

#[test]
fn pads_short_rows_and_dedupes_headers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "valores.csv", "id;1-2015;1-2015;\n7;0,5\n");

    let sheet = read_csv_sheet(&path, SpreadsheetKind::Values, b';').expect("read csv");
    assert_eq!(
        sheet.column_names(),
        vec!["id", "1-2015", "1-2015_2", "coluna_4"]
    );
    assert_eq!(
        column_strings(&sheet.frame, "1-2015_2").expect("column"),
        vec![""]
    );
}

#[test]
fn reads_two_level_headers_with_merged_groups() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        &dir,
        "proporcionalidades.csv",
        "id,2-2015,,3-2015\n,4-2015,5-2015,6-2015\n1,0.5,0.5,1\n",
    );

    let sheet = read_csv_sheet(&path, SpreadsheetKind::Proportionalities, b',').expect("read csv");
    let groups = sheet.header_groups.clone().expect("two-level headers");
    assert_eq!(
        groups,
        vec![
            ("id".to_string(), String::new()),
            ("2-2015".to_string(), "4-2015".to_string()),
            ("2-2015".to_string(), "5-2015".to_string()),
            ("3-2015".to_string(), "6-2015".to_string()),
        ]
    );
    assert_eq!(
        sheet.column_names(),
        vec!["id", "2-2015::4-2015", "2-2015::5-2015", "3-2015::6-2015"]
    );
    assert_eq!(sheet.frame.height(), 1);
    assert!(sheet.header_texts().contains(&"5-2015".to_string()));
}

#[test]
fn header_only_sheet_is_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "composicao.csv", "codigo_pai,codigo_filho\n");

    let sheet = read_csv_sheet(&path, SpreadsheetKind::Composition, b',').expect("read csv");
    assert!(sheet.is_empty());
}
