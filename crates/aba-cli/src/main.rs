//! ABA bank batch file tool.

use std::io::{self, IsTerminal};

use aba_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_generate, run_inspect, run_validate};
use crate::summary::{print_generate_summary, print_issues, print_records};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Generate(args) => match run_generate(&args) {
            Ok(result) => {
                print_generate_summary(&result);
                if result.has_errors() { 1 } else { 0 }
            }
            Err(error) => report(&error),
        },
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(records) if args.json => match serde_json::to_string_pretty(&records) {
                Ok(json) => {
                    println!("{json}");
                    0
                }
                Err(error) => report(&error.into()),
            },
            Ok(records) => {
                print_records(&records);
                0
            }
            Err(error) => report(&error),
        },
        Command::Validate(args) => match run_validate(&args) {
            Ok(issues) => {
                print_issues(&issues);
                if issues.is_empty() { 0 } else { 1 }
            }
            Err(error) => report(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags.
///
/// An explicit `--log-level` beats `-v`/`-q`, and either one disables
/// `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), level_filter_for);
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    LogConfig::default()
        .with_level_filter(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_ansi(ansi)
        .with_log_file(cli.log_file.clone())
}

fn level_filter_for(level: LogLevelArg) -> LevelFilter {
    match level {
        LogLevelArg::Error => LevelFilter::ERROR,
        LogLevelArg::Warn => LevelFilter::WARN,
        LogLevelArg::Info => LevelFilter::INFO,
        LogLevelArg::Debug => LevelFilter::DEBUG,
        LogLevelArg::Trace => LevelFilter::TRACE,
    }
}
