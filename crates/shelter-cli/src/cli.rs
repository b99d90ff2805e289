//! Command-line arguments for the `shelter` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "shelter",
    version,
    about = "Normalize animal shelter intake and outcome exports",
    long_about = "Normalize animal shelter intake and outcome exports.\n\n\
                  Builds cleaned intake and outcome tables, an animal dimension\n\
                  table and a length-of-stay table as CSV files."
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
    /// Run the pipeline over an intake and an outcome export.
    Run(RunArgs),

    /// List the fixed classification vocabularies.
    Taxonomies,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Raw intake events CSV.
    #[arg(long = "intake", value_name = "CSV")]
    pub intake: PathBuf,

    /// Raw outcome events CSV.
    #[arg(long = "outcome", value_name = "CSV")]
    pub outcome: PathBuf,

    /// Directory the four tables are written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Run every stage and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
