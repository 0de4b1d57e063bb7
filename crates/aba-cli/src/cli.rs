//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aba",
    version,
    about = "Generate, inspect and validate ABA (Cemtex) bank batch files",
    long_about = "Generate, inspect and validate ABA (Cemtex) bank batch files.\n\n\
                  Every line of an ABA file is exactly 120 characters: one descriptive\n\
                  record, one or more transaction records and an optional file total."
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

    /// Log output format (pretty for human, json for machine parsing).
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
    /// Build an ABA file from a JSON batch description.
    Generate(GenerateArgs),

    /// Print every record and field of an ABA file.
    Inspect(InspectArgs),

    /// Check every field of an ABA file against its rules.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// JSON batch description.
    #[arg(value_name = "BATCH_JSON")]
    pub batch: PathBuf,

    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Separate lines with CRLF instead of LF.
    #[arg(long = "crlf")]
    pub crlf: bool,

    /// Terminate the last line too.
    #[arg(long = "trailing-newline")]
    pub trailing_newline: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// ABA file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// ABA file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
