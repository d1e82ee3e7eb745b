//! User-facing message texts of the composition checks.

use catalog_graph::{DirectedGraph, node_label};

pub fn cycle_found(file_name: &str, rendered_edges: &str) -> String {
    format!("{file_name}: Ciclo encontrado: [{rendered_edges}].")
}

pub fn level_order(
    file_name: &str,
    line: usize,
    parent: &str,
    parent_level: i64,
    child: &str,
    child_level: i64,
) -> String {
    format!(
        "{file_name}, linha {line}: O indicador {} (nível {parent_level}) não pode ser pai do indicador {} (nível {child_level}). Atualize os níveis no arquivo de descrição.",
        node_label(parent),
        node_label(child)
    )
}

pub fn parent_without_level(file_name: &str, line: usize, parent: &str) -> String {
    format!(
        "{file_name}, linha {line}: O indicador pai {} não está presente no arquivo de descrição.",
        node_label(parent)
    )
}

pub fn child_without_level(file_name: &str, line: usize, child: &str) -> String {
    format!(
        "{file_name}, linha {line}: O indicador filho {} não está presente no arquivo de descrição.",
        node_label(child)
    )
}

pub fn parent_not_found(file_name: &str, parent: &str) -> String {
    format!(
        "{file_name}: O indicador pai {} não foi encontrado no arquivo de descrição.",
        node_label(parent)
    )
}

pub fn children_levels_differ(file_name: &str, parent: &str, children: &[(String, i64)]) -> String {
    let listed = children
        .iter()
        .map(|(child, level)| format!("indicador {} possui nível '{level}'", node_label(child)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{file_name}: Indicadores filhos do pai {} não estão no mesmo nível: [{listed}].",
        node_label(parent)
    )
}

pub fn only_in_description(file_name: &str, codes: &[i64]) -> String {
    format!(
        "{file_name}: Indicadores presentes no arquivo de descrição e ausentes no arquivo de composição: [{}].",
        join_codes(codes)
    )
}

pub fn only_in_composition(file_name: &str, codes: &[i64]) -> String {
    format!(
        "{file_name}: Indicadores presentes no arquivo de composição e ausentes no arquivo de descrição: [{}].",
        join_codes(codes)
    )
}

pub fn disconnected(file_name: &str, islands: &[DirectedGraph]) -> String {
    let rendered = islands
        .iter()
        .map(|island| format!("[{}]", island.generate_graph_report()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{file_name}: Indicadores desconectados da árvore principal: {rendered}.")
}

pub fn root_missing(file_name: &str, root: &str) -> String {
    format!(
        "{file_name}: O indicador raiz {} não foi encontrado no arquivo de composição.",
        node_label(root)
    )
}

pub fn repeated_name(
    file_name: &str,
    lines: &[usize],
    name_kind: &str,
    name: &str,
    branch: &str,
) -> String {
    let lines = lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{file_name}, linhas [{lines}]: O {name_kind} '{name}' está repetido no ramo do indicador {}.",
        node_label(branch)
    )
}

pub fn leaf_without_values(file_name: &str, leaf: &str) -> String {
    format!(
        "{file_name}: O indicador folha {} não possui valores associados.",
        node_label(leaf)
    )
}

pub fn leaf_without_proportionalities(file_name: &str, leaf: &str) -> String {
    format!(
        "{file_name}: O indicador folha {} não possui proporcionalidades associadas.",
        node_label(leaf)
    )
}

fn join_codes(codes: &[i64]) -> String {
    codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
