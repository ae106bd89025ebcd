//! CLI module for Recut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{EditArgs, EditOp, ExportArgs, InspectArgs, MediaArgs};

/// Recut timeline editor
///
/// Headless trim and crop-keyframe editing for video projects. Media facts
/// (frame rate, duration, frame size) are passed on the command line.
#[derive(Parser, Debug)]
#[command(name = "recut")]
#[command(about = "Recut - trim markers and animated crops for video projects")]
#[command(version)]
pub struct Cli {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, env = "RECUT_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Config file to use instead of the default locations
    #[arg(long, global = true, env = "RECUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show markers, output segments and crop keyframes of a project
    Inspect(InspectArgs),
    /// Apply edit operations to a project and save it
    Edit(EditArgs),
    /// Export the edited timeline through the transcoder
    Export(ExportArgs),
}
