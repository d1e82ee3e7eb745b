//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use catalog_model::CompositionStrategy;

#[derive(Parser)]
#[command(
    name = "catalog-validator",
    version,
    about = "Validate the composition hierarchy of an indicator catalog",
    long_about = "Validate the composition hierarchy of an indicator catalog.\n\n\
                  Reads the description, composition, values and proportionality\n\
                  sheets from a folder and checks that the composition forms a\n\
                  single rooted tree consistent with levels, names and data columns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the sheets in a dataset folder.
    Validate(ValidateArgs),

    /// List the checks each strategy runs.
    Checks,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Folder containing the dataset CSV files.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// TOML file with column names, file names and check options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Composition strategies to run (default: from config, both if unset).
    #[arg(long = "strategy", value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Require each child to sit exactly one level below its parent.
    #[arg(long = "strict-levels")]
    pub strict_levels: bool,

    /// Also write the check reports as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Tree,
    Graph,
    Both,
}

impl StrategyArg {
    pub fn strategies(self) -> Vec<CompositionStrategy> {
        match self {
            StrategyArg::Tree => vec![CompositionStrategy::Tree],
            StrategyArg::Graph => vec![CompositionStrategy::Graph],
            StrategyArg::Both => vec![CompositionStrategy::Tree, CompositionStrategy::Graph],
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
