//! Hierarchy level consistency between composition and description.

use std::collections::HashMap;

use crate::edge::CompositionEdge;

/// Code -> declared level, read from the description sheet.
#[derive(Debug, Clone, Default)]
pub struct LevelMap {
    levels: HashMap<String, i64>,
}

impl LevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a level. The first declaration of a code wins.
    pub fn insert(&mut self, code: impl Into<String>, level: i64) {
        self.levels.entry(code.into()).or_insert(level);
    }

    pub fn get(&self, code: &str) -> Option<i64> {
        self.levels.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.levels.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for LevelMap {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut map = LevelMap::new();
        for (code, level) in iter {
            map.insert(code, level);
        }
        map
    }
}

/// A composition row whose levels do not fit the hierarchy.
///
/// `parent` only: the parent code is missing from the level map.
/// `child` only: the child code is missing from the level map.
/// Both: the child level does not follow the parent level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelViolation {
    pub row: usize,
    pub parent: Option<String>,
    pub child: Option<String>,
}

impl LevelViolation {
    pub fn pair(&self) -> (Option<&str>, Option<&str>) {
        (self.parent.as_deref(), self.child.as_deref())
    }
}

/// Check every composition row against the declared levels.
///
/// `accepts(parent_level, child_level)` decides whether a step is valid.
/// Violations follow row order; each row is evaluated on its own, so a code
/// missing from the level map is reported once per row it appears in.
pub fn validate_level_hierarchy<F>(
    edges: &[CompositionEdge],
    levels: &LevelMap,
    accepts: F,
) -> Vec<LevelViolation>
where
    F: Fn(i64, i64) -> bool,
{
    let mut violations = Vec::new();
    for edge in edges {
        let parent_level = levels.get(&edge.parent);
        let child_level = levels.get(&edge.child);

        if parent_level.is_none() {
            violations.push(LevelViolation {
                row: edge.row,
                parent: Some(edge.parent.clone()),
                child: None,
            });
        }
        if child_level.is_none() {
            violations.push(LevelViolation {
                row: edge.row,
                parent: None,
                child: Some(edge.child.clone()),
            });
        }
        if let (Some(parent_level), Some(child_level)) = (parent_level, child_level) {
            if !accepts(parent_level, child_level) {
                violations.push(LevelViolation {
                    row: edge.row,
                    parent: Some(edge.parent.clone()),
                    child: Some(edge.child.clone()),
                });
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<CompositionEdge> {
        pairs
            .iter()
            .enumerate()
            .map(|(row, (p, c))| CompositionEdge::new(row, *p, *c))
            .collect()
    }

    fn increasing(parent: i64, child: i64) -> bool {
        child > parent
    }

    #[test]
    fn ordered_levels_pass() {
        let levels: LevelMap = [("1", 1), ("2", 2), ("3", 3)].into_iter().collect();
        let violations = validate_level_hierarchy(&edges(&[("1", "2"), ("2", "3")]), &levels, increasing);
        assert!(violations.is_empty());
    }

    #[test]
    fn inverted_levels_are_reported() {
        let levels: LevelMap = [("1", 2), ("2", 1), ("3", 3)].into_iter().collect();
        let violations = validate_level_hierarchy(&edges(&[("1", "2"), ("2", "3")]), &levels, increasing);
        let pairs: Vec<_> = violations.iter().map(LevelViolation::pair).collect();
        assert_eq!(pairs, vec![(Some("1"), Some("2"))]);
    }

    #[test]
    fn equal_levels_are_reported() {
        let levels: LevelMap = [("1", 1), ("2", 1)].into_iter().collect();
        let violations = validate_level_hierarchy(&edges(&[("1", "2")]), &levels, increasing);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn missing_codes_are_reported_per_row() {
        let levels: LevelMap = [("1", 1)].into_iter().collect();
        let violations = validate_level_hierarchy(
            &edges(&[("1", "9"), ("9", "8"), ("1", "9")]),
            &levels,
            increasing,
        );
        let pairs: Vec<_> = violations.iter().map(LevelViolation::pair).collect();
        assert_eq!(
            pairs,
            vec![
                (None, Some("9")),
                (Some("9"), None),
                (None, Some("8")),
                (None, Some("9")),
            ]
        );
        assert_eq!(violations[1].row, 1);
    }

    #[test]
    fn first_declared_level_wins() {
        let levels: LevelMap = [("4", 2), ("4", 5)].into_iter().collect();
        assert_eq!(levels.get("4"), Some(2));
        assert_eq!(levels.len(), 1);
    }
}
