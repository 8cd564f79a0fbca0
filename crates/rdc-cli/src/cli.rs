//! CLI argument definitions for the retail dimension cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use rdc_model::EntityKind;

#[derive(Parser)]
#[command(
    name = "rdc",
    version,
    about = "Retail data cleaner - turn raw extracts into analysis-ready tables",
    long_about = "Clean raw retail extracts (users, cards, stores, products, orders and\n\
                  date events) with a fixed per-entity pipeline and write the result\n\
                  to its destination table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Extract, clean and persist one entity.
    Clean(CleanArgs),

    /// Show the cleaning steps for an entity.
    Plan(PlanArgs),

    /// List the supported entity kinds.
    Entities,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Entity kind (user, card, store, product, order, date_event).
    #[arg(value_name = "ENTITY")]
    pub entity: EntityKind,

    /// Source extract (.csv, or .json for columnar documents and record arrays).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory receiving the destination table (default: ./output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON file with cleaning options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail unless exactly this many rows survive cleaning (overrides the config).
    #[arg(long = "expect-rows", value_name = "N")]
    pub expect_rows: Option<usize>,

    /// Clean and report without writing the destination table.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Entity kind to describe.
    #[arg(value_name = "ENTITY")]
    pub entity: EntityKind,

    /// Print the step list as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
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
