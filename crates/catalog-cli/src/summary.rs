use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use catalog_model::{CheckReport, CheckStatus, IssueSeverity};

use crate::types::{SheetSummary, ValidationRun};

pub fn print_summary(run: &ValidationRun) {
    println!("Folder: {}", run.folder.display());
    println!("{}", sheet_table(&run.sheets));
    println!("{}", check_table(&run.reports));
    if let Some(table) = issue_table(&run.reports) {
        println!();
        println!("Issues:");
        println!("{table}");
    }
}

pub fn sheet_table(sheets: &[SheetSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("File"),
        header_cell("Status"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for sheet in sheets {
        let status = if !sheet.exists {
            Cell::new("missing").fg(Color::Yellow)
        } else if !sheet.read_ok {
            Cell::new("unreadable").fg(Color::Red)
        } else {
            Cell::new("loaded").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(sheet.kind.as_str()),
            Cell::new(&sheet.file_name),
            status,
            count_cell(sheet.exists.then_some(sheet.rows), Color::Reset),
        ]);
    }
    table
}

/// One row per check plus a bold total row.
pub fn check_table(reports: &[CheckReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Validator"),
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for report in reports {
        let executed = report.was_executed();
        total_errors += report.error_count();
        total_warnings += report.warning_count();
        table.add_row(vec![
            Cell::new(&report.validator).fg(Color::Blue),
            Cell::new(&report.check),
            status_cell(report.status),
            count_cell(executed.then_some(report.error_count()), Color::Red),
            count_cell(executed.then_some(report.warning_count()), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} checks", reports.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(Some(total_errors), Color::Red).add_attribute(Attribute::Bold),
        count_cell(Some(total_warnings), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Every message, errors first; `None` when the run is clean.
pub fn issue_table(reports: &[CheckReport]) -> Option<Table> {
    let mut rows: Vec<(&str, IssueSeverity, &str)> = reports
        .iter()
        .flat_map(|report| {
            report
                .messages()
                .map(move |(severity, message)| (report.check.as_str(), severity, message))
        })
        .collect();
    if rows.is_empty() {
        return None;
    }
    rows.sort_by_key(|(_, severity, _)| severity_rank(*severity));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (check, severity, message) in rows {
        table.add_row(vec![
            Cell::new(check),
            severity_cell(severity),
            Cell::new(message),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(14)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: CheckStatus) -> Cell {
    match status {
        CheckStatus::Passed => Cell::new("PASSED").fg(Color::Green),
        CheckStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        CheckStatus::NotExecuted => dim_cell("NOT EXECUTED"),
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
