//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::analytics::Payload;
use crate::recovery::ProcedureId;

/// Procedure list arguments.
#[derive(Debug, Args)]
pub struct ProceduresCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Timeline command arguments.
#[derive(Debug, Args)]
pub struct TimelineCommand {
    /// Procedure to show (defaults to the configured procedure)
    #[arg(short, long, value_enum)]
    pub procedure: Option<ProcedureArg>,

    /// Days since surgery (defaults to the configured value)
    #[arg(short, long)]
    pub day: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Focus command arguments.
#[derive(Debug, Args)]
pub struct FocusCommand {
    /// Procedure to show (defaults to the configured procedure)
    #[arg(short, long, value_enum)]
    pub procedure: Option<ProcedureArg>,

    /// Days since surgery (defaults to the configured value)
    #[arg(short, long)]
    pub day: Option<u32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Track command arguments.
#[derive(Debug, Args)]
pub struct TrackCommand {
    /// Event name
    pub name: String,

    /// Event payload as a JSON object, e.g. '{"tab":"home"}'
    #[arg(long, value_parser = parse_payload)]
    pub payload: Option<Payload>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Show at most this many events
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Procedure argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProcedureArg {
    /// Rhinoplasty
    Rhinoplasty,
    /// Breast augmentation
    #[value(alias = "breastAugmentation")]
    BreastAugmentation,
    /// Liposuction
    Liposuction,
}

impl From<ProcedureArg> for ProcedureId {
    fn from(arg: ProcedureArg) -> Self {
        match arg {
            ProcedureArg::Rhinoplasty => Self::Rhinoplasty,
            ProcedureArg::BreastAugmentation => Self::BreastAugmentation,
            ProcedureArg::Liposuction => Self::Liposuction,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Parse a `--payload` value into a JSON object.
fn parse_payload(raw: &str) -> Result<Payload, String> {
    serde_json::from_str(raw).map_err(|e| format!("payload must be a JSON object: {e}"))
}
