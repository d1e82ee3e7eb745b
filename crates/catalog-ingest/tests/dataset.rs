use std::fs;

use catalog_ingest::{IngestError, load_dataset};
use catalog_model::{SpreadsheetKind, ValidationConfig};

#[test]
fn loads_present_sheets_and_marks_missing_ones() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("descricao.csv"),
        "codigo,nivel,nome_simples,nome_completo\n1,1,Raiz,Indicador raiz\n",
    )
    .expect("write description");
    fs::write(
        dir.path().join("composicao.csv"),
        "codigo_pai,codigo_filho\n0,1\n",
    )
    .expect("write composition");

    let registry = load_dataset(dir.path(), &ValidationConfig::default()).expect("load dataset");

    let description = registry.get(SpreadsheetKind::Description).expect("description");
    assert!(description.exists);
    assert_eq!(description.frame.height(), 1);

    let values = registry.get(SpreadsheetKind::Values).expect("values entry");
    assert!(!values.exists);
    assert!(!values.read_ok);
    assert!(registry.is_empty(SpreadsheetKind::Values));
    assert!(!registry.is_empty(SpreadsheetKind::Composition));
    assert_eq!(registry.iter().count(), 4);
}

#[test]
fn honours_configured_delimiter_and_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("comp.csv"), "codigo_pai;codigo_filho\n1;2\n1;3\n")
        .expect("write composition");

    let mut config = ValidationConfig::default();
    config.delimiter = ';';
    config.files.composition = "comp.csv".to_string();

    let registry = load_dataset(dir.path(), &config).expect("load dataset");
    let composition = registry.get(SpreadsheetKind::Composition).expect("composition");
    assert_eq!(composition.file_name, "comp.csv");
    assert_eq!(composition.frame.height(), 2);
    assert_eq!(composition.frame.width(), 2);
}

#[test]
fn missing_folder_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope");
    let err = load_dataset(&missing, &ValidationConfig::default()).expect_err("missing folder");
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}
