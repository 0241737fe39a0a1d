//! Command-line interface for careapp.
//!
//! This module provides the CLI structure, command definitions and output
//! rendering for the `careapp` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClearCommand, ConfigCommand, FocusCommand, OutputFormat, ProcedureArg, ProceduresCommand,
    StatsCommand, TimelineCommand, TrackCommand,
};

/// careapp - Post-operative recovery companion
///
/// Shows recovery milestones for a procedure and keeps a small, local-only
/// log of interactions for diagnostics.
#[derive(Debug, Parser)]
#[command(name = "careapp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List known procedures
    Procedures(ProceduresCommand),

    /// Show the recovery timeline for a procedure
    Timeline(TimelineCommand),

    /// Show today's milestones
    Focus(FocusCommand),

    /// Record an interaction event
    Track(TrackCommand),

    /// Record the symptom checker's "call surgeon" action
    CallSurgeon,

    /// Show local analytics
    Stats(StatsCommand),

    /// Erase local analytics
    Clear(ClearCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
