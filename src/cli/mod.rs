//! CLI module for ClipCat
//!
//! This module handles command-line argument parsing and command execution.

use clap::Parser;

pub mod args;
pub mod commands;

/// ClipCat CLI
///
/// Extracts multiple time ranges from a source video and concatenates them
/// into a single output, optionally re-framed to a target resolution.
#[derive(Parser, Debug)]
#[command(name = "clipcat")]
#[command(about = "Extract multiple ranges from a video and concatenate them into one output")]
#[command(version)]
#[command(after_help = "Examples:
  clipcat input.mp4 00:00:10 00:00:30 00:05:00 00:05:20
  clipcat input.mp4 10 30 --output shorts.mp4 --resolution 1080x1920
  clipcat input.mp4 10 30 300 320 --scale-mode crop --dry-run")]
pub struct Cli {
    #[command(flatten)]
    pub args: args::ExtractArgs,
}
