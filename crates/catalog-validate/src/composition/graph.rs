//! Directed-graph strategy.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;

use catalog_graph::{DirectedGraph, format_cycle_path, normalize_code};
use catalog_ingest::Spreadsheet;
use catalog_model::{CheckReport, SpreadsheetKind, ValidationConfig, ValidationOutcome};

use super::{
    CleanedComposition, SYNTHETIC_ROOT, SheetSet, VALIDATOR_NAME, clean_composition,
    clean_description, header_code, messages, missing_columns, text_column,
};
use crate::runner::{CheckResult, run_check};

const RELATIONS: &str = "validate_relation_indicators_in_composition";
const HIERARCHY: &str = "validate_relations_hierarchy_with_graph";
const UNIQUE_TITLES: &str = "validate_unique_titles_with_graph";
const LEAF_DATA: &str = "validate_associated_indicators_leafs";

pub struct GraphStrategy<'a> {
    sheets: SheetSet<'a>,
    config: &'a ValidationConfig,
    report_cleaning: bool,
}

/// Codes present in only one of the two sheets, ascending.
#[derive(Debug, Default)]
struct RelationGaps {
    only_description: Vec<i64>,
    only_composition: Vec<i64>,
}

impl RelationGaps {
    fn is_empty(&self) -> bool {
        self.only_description.is_empty() && self.only_composition.is_empty()
    }
}

impl<'a> GraphStrategy<'a> {
    pub const CHECKS: &'static [&'static str] = &[RELATIONS, HIERARCHY, UNIQUE_TITLES, LEAF_DATA];

    /// Invalid cells are reported by the relations check unless
    /// `report_cleaning` is off, which is the case when the tree strategy
    /// runs in the same pass and reports them itself.
    pub(crate) fn new(
        sheets: SheetSet<'a>,
        config: &'a ValidationConfig,
        report_cleaning: bool,
    ) -> Self {
        Self {
            sheets,
            config,
            report_cleaning,
        }
    }

    pub fn run(&self) -> Vec<CheckReport> {
        vec![
            run_check(VALIDATOR_NAME, RELATIONS, || self.relations()),
            run_check(VALIDATOR_NAME, HIERARCHY, || self.hierarchy()),
            run_check(VALIDATOR_NAME, UNIQUE_TITLES, || self.unique_titles()),
            run_check(VALIDATOR_NAME, LEAF_DATA, || self.leaf_data()),
        ]
    }

    fn any_empty(&self, kinds: &[SpreadsheetKind]) -> bool {
        kinds.iter().any(|kind| self.sheets.is_empty(*kind))
    }

    fn composition_column_errors(&self, composition: &Spreadsheet) -> Vec<String> {
        let columns = &self.config.schema.composition;
        missing_columns(
            composition,
            &[columns.parent.as_str(), columns.child.as_str()],
        )
    }

    /// Codes of the description sheet against codes used in composition
    /// rows. The synthetic root 0 takes no part in the comparison.
    fn relation_gaps(
        &self,
        description: &Spreadsheet,
        cleaned: &CleanedComposition,
    ) -> Result<(RelationGaps, Vec<String>)> {
        let described = clean_description(description, self.config, false)?;
        let declared: BTreeSet<i64> = described
            .rows
            .iter()
            .filter_map(|row| row.code.parse().ok())
            .collect();
        let used: BTreeSet<i64> = cleaned
            .codes()
            .filter(|code| *code != SYNTHETIC_ROOT)
            .filter_map(|code| code.parse().ok())
            .collect();

        let gaps = RelationGaps {
            only_description: declared.difference(&used).copied().collect(),
            only_composition: used.difference(&declared).copied().collect(),
        };
        Ok((gaps, described.errors))
    }

    /// Every described code is used in the composition and vice versa.
    fn relations(&self) -> Result<CheckResult> {
        if self.any_empty(&[SpreadsheetKind::Description, SpreadsheetKind::Composition]) {
            return Ok(CheckResult::NotExecuted);
        }
        let description = self.sheets.require(SpreadsheetKind::Description)?;
        let composition = self.sheets.require(SpreadsheetKind::Composition)?;

        let mut missing = missing_columns(
            description,
            &[self.config.schema.description.code.as_str()],
        );
        missing.extend(self.composition_column_errors(composition));
        if !missing.is_empty() {
            return Ok(ValidationOutcome::from_errors(missing).into());
        }

        let cleaned = clean_composition(composition, self.config)?;
        let (gaps, description_errors) = self.relation_gaps(description, &cleaned)?;

        let mut outcome = ValidationOutcome::new();
        if self.report_cleaning {
            outcome.extend_errors(description_errors);
            outcome.extend_errors(cleaned.errors);
        }
        if !gaps.only_description.is_empty() {
            outcome.push_error(messages::only_in_description(
                &description.file_name,
                &gaps.only_description,
            ));
        }
        if !gaps.only_composition.is_empty() {
            outcome.push_error(messages::only_in_composition(
                &composition.file_name,
                &gaps.only_composition,
            ));
        }
        Ok(outcome.into())
    }

    /// No cycles and a single connected hierarchy.
    fn hierarchy(&self) -> Result<CheckResult> {
        if self.any_empty(&[SpreadsheetKind::Composition]) {
            return Ok(CheckResult::NotExecuted);
        }
        let composition = self.sheets.require(SpreadsheetKind::Composition)?;
        let missing = self.composition_column_errors(composition);
        if !missing.is_empty() {
            return Ok(ValidationOutcome::from_errors(missing).into());
        }

        let cleaned = clean_composition(composition, self.config)?;
        let graph = composition_graph(&cleaned);
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "composition graph built"
        );
        let comp_file = composition.file_name.as_str();

        let mut outcome = ValidationOutcome::new();
        if let Some(cycle) = graph.detect_cycles() {
            outcome.push_error(messages::cycle_found(comp_file, &render_cycle(&cycle)));
        }
        let root = normalize_code(&self.config.root_code);
        let islands = graph.detect_disconnected_components(&root);
        if !islands.is_empty() {
            tracing::debug!(islands = islands.len(), "disconnected components found");
            outcome.push_error(messages::disconnected(comp_file, &islands));
        }
        Ok(outcome.into())
    }

    /// Simple and complete names are unique inside each branch under the root.
    ///
    /// Only meaningful on a well-formed hierarchy: with relation gaps, a cycle
    /// or islands the check ends without findings, those being reported by
    /// the checks above.
    fn unique_titles(&self) -> Result<CheckResult> {
        if self.any_empty(&[SpreadsheetKind::Description, SpreadsheetKind::Composition]) {
            return Ok(CheckResult::NotExecuted);
        }
        let description = self.sheets.require(SpreadsheetKind::Description)?;
        let composition = self.sheets.require(SpreadsheetKind::Composition)?;

        let columns = &self.config.schema.description;
        let mut missing = missing_columns(
            description,
            &[
                columns.code.as_str(),
                columns.simple_name.as_str(),
                columns.complete_name.as_str(),
            ],
        );
        missing.extend(self.composition_column_errors(composition));
        if !missing.is_empty() {
            return Ok(ValidationOutcome::from_errors(missing).into());
        }

        let cleaned = clean_composition(composition, self.config)?;
        let (gaps, _) = self.relation_gaps(description, &cleaned)?;
        if !gaps.is_empty() {
            return Ok(ValidationOutcome::new().into());
        }
        let graph = composition_graph(&cleaned);
        let root = normalize_code(&self.config.root_code);
        let has_islands = !graph.detect_disconnected_components(&root).is_empty();
        if graph.detect_cycles().is_some() || has_islands {
            return Ok(ValidationOutcome::new().into());
        }

        let Some(tree) = graph.convert_to_tree(&root) else {
            return Ok(ValidationOutcome::from_errors(vec![messages::root_missing(
                &composition.file_name,
                &root,
            )])
            .into());
        };
        tracing::debug!(
            root = tree.root(),
            nodes = tree.node_count(),
            "hierarchy oriented from root"
        );

        let described = clean_description(description, self.config, false)?;
        let simple_names = text_column(&description.frame, &columns.simple_name)?;
        let complete_names = text_column(&description.frame, &columns.complete_name)?;

        let mut outcome = ValidationOutcome::new();
        for branch in tree.root_children() {
            let subtree = tree.subtree(branch);
            let members: HashSet<&str> = subtree.nodes().collect();
            let rows: Vec<(usize, usize)> = described
                .rows
                .iter()
                .filter(|row| members.contains(row.code.as_str()))
                .map(|row| (row.row, row.line()))
                .collect();

            for (name_kind, names) in [
                ("nome simples", &simple_names),
                ("nome completo", &complete_names),
            ] {
                for (name, lines) in repeated_names(&rows, names) {
                    outcome.push_warning(messages::repeated_name(
                        &description.file_name,
                        &lines,
                        name_kind,
                        name,
                        branch,
                    ));
                }
            }
        }
        Ok(outcome.into())
    }

    /// Every leaf has a column in the values sheet and, when that sheet is
    /// filled in, in the proportionalities sheet.
    fn leaf_data(&self) -> Result<CheckResult> {
        if self.any_empty(&[SpreadsheetKind::Values, SpreadsheetKind::Composition]) {
            return Ok(CheckResult::NotExecuted);
        }
        let values = self.sheets.require(SpreadsheetKind::Values)?;
        let composition = self.sheets.require(SpreadsheetKind::Composition)?;
        let missing = self.composition_column_errors(composition);
        if !missing.is_empty() {
            return Ok(ValidationOutcome::from_errors(missing).into());
        }

        let cleaned = clean_composition(composition, self.config)?;
        let mut leaves = composition_graph(&cleaned).leaf_nodes();
        leaves.sort_by_key(|leaf| (leaf.parse::<i64>().ok(), leaf.clone()));

        let mut outcome = ValidationOutcome::new();
        let value_codes = header_codes(values.column_names());
        for leaf in leaves.iter().filter(|leaf| !value_codes.contains(*leaf)) {
            outcome.push_error(messages::leaf_without_values(&values.file_name, leaf));
        }

        if let Some(proportions) = self
            .sheets
            .get(SpreadsheetKind::Proportionalities)
            .filter(|sheet| !sheet.is_empty())
        {
            let proportion_codes = header_codes(proportions.header_texts());
            for leaf in leaves.iter().filter(|leaf| !proportion_codes.contains(*leaf)) {
                outcome.push_error(messages::leaf_without_proportionalities(
                    &proportions.file_name,
                    leaf,
                ));
            }
        }
        Ok(outcome.into())
    }
}

fn composition_graph(cleaned: &CleanedComposition) -> DirectedGraph {
    DirectedGraph::from_edges(
        cleaned
            .edges
            .iter()
            .map(|edge| (edge.parent.as_str(), edge.child.as_str())),
    )
}

fn render_cycle(edges: &[(String, String)]) -> String {
    let mut path: Vec<String> = edges
        .first()
        .map(|(source, _)| source.clone())
        .into_iter()
        .collect();
    path.extend(edges.iter().map(|(_, target)| target.clone()));
    format_cycle_path(&path)
}

fn header_codes(headers: Vec<String>) -> HashSet<String> {
    headers.iter().filter_map(|header| header_code(header)).collect()
}

/// Non-blank names shared by more than one of `rows`, in order of first
/// appearance, with the spreadsheet lines they occur on.
fn repeated_names<'n>(
    rows: &[(usize, usize)],
    names: &'n [String],
) -> Vec<(&'n str, Vec<usize>)> {
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for (row, line) in rows {
        let Some(name) = names.get(*row).map(String::as_str) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        match position.get(name) {
            Some(idx) => groups[*idx].1.push(*line),
            None => {
                position.insert(name, groups.len());
                groups.push((name, vec![*line]));
            }
        }
    }
    groups.retain(|(_, lines)| lines.len() > 1);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_group_by_first_appearance() {
        let names: Vec<String> = ["A", "B", "A", "", "", "B", "C"]
            .iter()
            .map(|name| name.to_string())
            .collect();
        let rows: Vec<(usize, usize)> = (0..names.len()).map(|row| (row, row + 2)).collect();
        assert_eq!(
            repeated_names(&rows, &names),
            vec![("A", vec![2, 4]), ("B", vec![3, 7])]
        );
    }

    #[test]
    fn cycle_edges_render_as_path() {
        let edges = vec![
            ("1".to_string(), "2".to_string()),
            ("2".to_string(), "1".to_string()),
        ];
        assert_eq!(render_cycle(&edges), "1 -> 2, 2 -> 1");
    }
}
