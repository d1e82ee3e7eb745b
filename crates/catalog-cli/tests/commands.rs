use std::fs;
use std::path::Path;

use catalog_cli::commands::{checks_table, resolve_config, run_validate};
use catalog_cli::summary::{check_table, issue_table};
use catalog_cli::types::ValidateOptions;
use catalog_model::{CheckStatus, CompositionStrategy, LevelStepPolicy};

fn write_dataset(dir: &Path, composition: &str) {
    fs::write(
        dir.join("descricao.csv"),
        "codigo,nivel,nome_simples,nome_completo\n\
         1,1,Total,Total geral\n\
         2,2,Receita,Receita total\n\
         3,3,Impostos,Impostos sobre receita\n",
    )
    .expect("write description");
    fs::write(dir.join("composicao.csv"), composition).expect("write composition");
    fs::write(dir.join("valores.csv"), "id,3-2015,3-2016\n1,10,12\n").expect("write values");
}

fn options(dir: &Path) -> ValidateOptions {
    ValidateOptions {
        folder: dir.to_path_buf(),
        ..ValidateOptions::default()
    }
}

#[test]
fn clean_dataset_has_no_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_dataset(dir.path(), "codigo_pai,codigo_filho\n0,1\n1,2\n2,3\n");

    let run = run_validate(&options(dir.path())).expect("run");
    assert!(!run.has_errors, "{:#?}", run.reports);
    assert_eq!(run.reports.len(), 6);
    assert_eq!(run.sheets.len(), 4);
    assert!(
        run.reports
            .iter()
            .all(|report| report.status == CheckStatus::Passed)
    );
    assert!(issue_table(&run.reports).is_none());
}

#[test]
fn cycle_fails_the_run_and_lands_in_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_dataset(dir.path(), "codigo_pai,codigo_filho\n1,2\n2,3\n3,1\n");
    let json_path = dir.path().join("report.json");

    let run = run_validate(&ValidateOptions {
        strategies: Some(vec![CompositionStrategy::Graph]),
        json_output: Some(json_path.clone()),
        ..options(dir.path())
    })
    .expect("run");
    assert!(run.has_errors);
    assert_eq!(run.reports.len(), 4);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read json")).expect("json");
    let reports = json["reports"].as_array().expect("reports array");
    let hierarchy = reports
        .iter()
        .find(|report| report["check"] == "validate_relations_hierarchy_with_graph")
        .expect("hierarchy report");
    assert_eq!(hierarchy["status"], "failed");
    assert!(
        hierarchy["errors"][0]
            .as_str()
            .is_some_and(|message| message.contains("Ciclo encontrado"))
    );

    let table = issue_table(&run.reports).expect("issues").to_string();
    assert!(table.contains("Ciclo encontrado"));
}

#[test]
fn strict_levels_flag_selects_exact_steps() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = resolve_config(&ValidateOptions {
        strict_levels: true,
        ..options(dir.path())
    })
    .expect("config");
    assert_eq!(config.level_policy, LevelStepPolicy::ExactlyOne);

    write_dataset(dir.path(), "codigo_pai,codigo_filho\n1,3\n1,2\n");
    let run = run_validate(&ValidateOptions {
        strict_levels: true,
        strategies: Some(vec![CompositionStrategy::Tree]),
        ..options(dir.path())
    })
    .expect("run");
    assert!(run.has_errors);
}

#[test]
fn config_file_is_applied() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("descricao.csv"),
        "cod;nivel;nome_simples;nome_completo\n1;1;A;A\n2;2;B;B\n",
    )
    .expect("write description");
    fs::write(dir.path().join("comp.csv"), "pai;filho\n1;2\n").expect("write composition");
    let config_path = dir.path().join("catalog.toml");
    fs::write(
        &config_path,
        "delimiter = \";\"\nstrategies = [\"tree\"]\n\n\
         [files]\ncomposition = \"comp.csv\"\n\n\
         [schema.description]\ncode = \"cod\"\n\n\
         [schema.composition]\nparent = \"pai\"\nchild = \"filho\"\n",
    )
    .expect("write config");

    let run = run_validate(&ValidateOptions {
        config_path: Some(config_path),
        ..options(dir.path())
    })
    .expect("run");
    assert_eq!(run.reports.len(), 2);
    assert!(!run.has_errors, "{:#?}", run.reports);
}

#[test]
fn missing_folder_is_reported_with_context() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = run_validate(&options(&dir.path().join("absent"))).expect_err("missing folder");
    assert!(format!("{err:#}").contains("load dataset from"));
}

#[test]
fn summary_tables_list_every_check() {
    let rendered = checks_table().to_string();
    for check in [
        "validate_hierarchy_with_tree",
        "validate_tree_levels_children",
        "validate_relation_indicators_in_composition",
        "validate_relations_hierarchy_with_graph",
        "validate_unique_titles_with_graph",
        "validate_associated_indicators_leafs",
    ] {
        assert!(rendered.contains(check), "{check}");
    }

    let dir = tempfile::tempdir().expect("temp dir");
    write_dataset(dir.path(), "codigo_pai,codigo_filho\n1,2\n2,3\n");
    let run = run_validate(&options(dir.path())).expect("run");
    let table = check_table(&run.reports).to_string();
    assert!(table.contains("TOTAL"));
    assert!(table.contains("6 checks"));
}
