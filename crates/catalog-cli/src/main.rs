//! Indicator catalog validator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use catalog_cli::commands::{run_checks, run_validate};
use catalog_cli::logging::{LogConfig, LogFormat, init_logging};
use catalog_cli::summary::print_summary;
use catalog_cli::types::ValidateOptions;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ValidateArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Validate(args) => match run_validate(&validate_options(args)) {
            Ok(run) => {
                print_summary(&run);
                if run.has_errors { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Checks => match run_checks() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn validate_options(args: ValidateArgs) -> ValidateOptions {
    ValidateOptions {
        folder: args.folder,
        config_path: args.config,
        strategies: args.strategy.map(|strategy| strategy.strategies()),
        strict_levels: args.strict_levels,
        json_output: args.json,
    }
}

/// Logging configuration from the global flags. An explicit `--log-level`
/// wins over `-v`/`-q`; with neither, `RUST_LOG` may override the default.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
