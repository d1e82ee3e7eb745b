use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use catalog_ingest::load_dataset;
use catalog_model::{CompositionStrategy, LevelStepPolicy, ValidationConfig};
use catalog_validate::{CompositionValidator, run_validators};

use crate::summary::apply_table_style;
use crate::types::{SheetSummary, ValidateOptions, ValidationRun};

/// Configuration for a run: the TOML file if given, then command-line
/// overrides.
pub fn resolve_config(options: &ValidateOptions) -> Result<ValidationConfig> {
    let mut config = match &options.config_path {
        Some(path) => ValidationConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => ValidationConfig::default(),
    };
    if let Some(strategies) = &options.strategies {
        config = config.with_strategies(strategies.clone());
    }
    if options.strict_levels {
        config = config.with_level_policy(LevelStepPolicy::ExactlyOne);
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

pub fn run_validate(options: &ValidateOptions) -> Result<ValidationRun> {
    let span = info_span!("validate", folder = %options.folder.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = resolve_config(options)?;
    let registry = load_dataset(&options.folder, &config)
        .with_context(|| format!("load dataset from {}", options.folder.display()))?;
    let sheets: Vec<SheetSummary> = registry
        .iter()
        .map(|sheet| SheetSummary {
            kind: sheet.kind,
            file_name: sheet.file_name.clone(),
            exists: sheet.exists,
            read_ok: sheet.read_ok,
            rows: sheet.frame.height(),
        })
        .collect();

    let reports = run_validators(&registry, &config);
    let has_errors = reports.iter().any(|report| report.has_errors());
    let run = ValidationRun {
        folder: options.folder.clone(),
        sheets,
        reports,
        has_errors,
    };
    info!(
        checks = run.reports.len(),
        errors = run.error_count(),
        warnings = run.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );

    if let Some(path) = &options.json_output {
        write_json_report(path, &run)?;
    }
    Ok(run)
}

pub fn write_json_report(path: &Path, run: &ValidationRun) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), run)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote JSON report");
    Ok(())
}

/// One row per check: strategy and check name.
pub fn checks_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Strategy", "Check"]);
    apply_table_style(&mut table);
    for strategy in [CompositionStrategy::Tree, CompositionStrategy::Graph] {
        for check in CompositionValidator::check_names(strategy) {
            table.add_row(vec![strategy.as_str(), *check]);
        }
    }
    table
}

pub fn run_checks() -> Result<()> {
    println!("{}", checks_table());
    Ok(())
}
