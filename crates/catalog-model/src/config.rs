//! Configuration for indicator catalog validation.
//!
//! All configuration is immutable once built and passed explicitly to the
//! validators. Every field has a default, so an empty TOML file is a valid
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::sheet::SpreadsheetKind;

/// Column names of the description sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionColumns {
    pub code: String,
    pub level: String,
    pub simple_name: String,
    pub complete_name: String,
}

impl Default for DescriptionColumns {
    fn default() -> Self {
        Self {
            code: "codigo".to_string(),
            level: "nivel".to_string(),
            simple_name: "nome_simples".to_string(),
            complete_name: "nome_completo".to_string(),
        }
    }
}

/// Column names of the composition sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionColumns {
    pub parent: String,
    pub child: String,
}

impl Default for CompositionColumns {
    fn default() -> Self {
        Self {
            parent: "codigo_pai".to_string(),
            child: "codigo_filho".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub description: DescriptionColumns,
    pub composition: CompositionColumns,
}

/// File names of each sheet inside the input folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub description: String,
    pub composition: String,
    pub values: String,
    pub proportionalities: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            description: "descricao.csv".to_string(),
            composition: "composicao.csv".to_string(),
            values: "valores.csv".to_string(),
            proportionalities: "proporcionalidades.csv".to_string(),
        }
    }
}

impl DatasetFiles {
    pub fn file_name(&self, kind: SpreadsheetKind) -> &str {
        match kind {
            SpreadsheetKind::Description => &self.description,
            SpreadsheetKind::Composition => &self.composition,
            SpreadsheetKind::Values => &self.values,
            SpreadsheetKind::Proportionalities => &self.proportionalities,
        }
    }
}

/// Rule for an acceptable parent to child level step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStepPolicy {
    /// The child level must be greater than the parent level. Skips such as
    /// 1 -> 3 are accepted.
    #[default]
    AnyIncrease,
    /// The child level must be exactly one more than the parent level.
    ExactlyOne,
}

impl LevelStepPolicy {
    pub fn accepts(&self, parent_level: i64, child_level: i64) -> bool {
        match self {
            LevelStepPolicy::AnyIncrease => child_level > parent_level,
            LevelStepPolicy::ExactlyOne => child_level - parent_level == 1,
        }
    }
}

/// Which composition checks to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionStrategy {
    /// Adjacency-tree checks: cycles from a DFS, level ordering, sibling levels.
    Tree,
    /// Directed-graph checks: code cross-reference, cycles, disconnected
    /// components, per-branch title uniqueness, leaf data coverage.
    Graph,
}

impl CompositionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionStrategy::Tree => "tree",
            CompositionStrategy::Graph => "graph",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub schema: ColumnSchema,
    pub files: DatasetFiles,
    pub level_policy: LevelStepPolicy,
    pub strategies: Vec<CompositionStrategy>,
    /// Code of the root indicator used by the graph strategy.
    pub root_code: String,
    /// CSV field delimiter.
    pub delimiter: char,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            schema: ColumnSchema::default(),
            files: DatasetFiles::default(),
            level_policy: LevelStepPolicy::default(),
            strategies: vec![CompositionStrategy::Tree, CompositionStrategy::Graph],
            root_code: "1".to_string(),
            delimiter: ',',
        }
    }
}

impl ValidationConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ValidationConfig =
            toml::from_str(&text).map_err(|source| CatalogError::Toml {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no check can run with.
    pub fn validate(&self) -> Result<()> {
        if self.strategies.is_empty() {
            return Err(CatalogError::InvalidConfig {
                message: "at least one composition strategy is required".to_string(),
            });
        }
        if self.root_code.trim().is_empty() {
            return Err(CatalogError::InvalidConfig {
                message: "root_code must not be empty".to_string(),
            });
        }
        if !self.delimiter.is_ascii() {
            return Err(CatalogError::InvalidConfig {
                message: format!("delimiter must be an ASCII character, got {:?}", self.delimiter),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<CompositionStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    #[must_use]
    pub fn with_level_policy(mut self, policy: LevelStepPolicy) -> Self {
        self.level_policy = policy;
        self
    }

    pub fn runs(&self, strategy: CompositionStrategy) -> bool {
        self.strategies.contains(&strategy)
    }
}
