//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use mrdc_model::EntityKind;

#[derive(Parser)]
#[command(
    name = "mrdc",
    version,
    about = "Retail data ETL - extract, clean and load business entities",
    long_about = "Extract users, cards, stores, products, orders and sale date/time events\n\
                  from their sources, clean them, and write one table per entity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

    /// Allow row values (personal data) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the pipeline described by a configuration file.
    Run(RunArgs),

    /// List entities, their target tables and allow-list columns.
    Entities,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Pipeline configuration file (TOML).
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: PathBuf,

    /// Entity to run; repeat for several (default: all configured).
    #[arg(long = "entity", short = 'e', value_name = "ENTITY", value_parser = parse_entity)]
    pub entities: Vec<EntityKind>,

    /// Output directory for cleaned tables (overrides the config file).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Extract and clean without writing tables.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

fn parse_entity(value: &str) -> Result<EntityKind, String> {
    value.parse()
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
