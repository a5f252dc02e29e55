//! ClipCat CLI
//!
//! A command-line tool that extracts multiple time ranges from a source
//! video and concatenates them into a single output file, re-framed to a
//! target resolution when requested.
//!
//! # Usage
//!
//! ```bash
//! clipcat input.mp4 00:00:10 00:00:30 00:05:00 00:05:20
//! clipcat input.mp4 10 30 --output shorts.mp4 --resolution 1080x1920
//! clipcat input.mp4 10 30 300 320 --scale-mode crop --dry-run
//! ```

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use clipcat_cli::cli::{commands, Cli};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = commands::run(cli.args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
