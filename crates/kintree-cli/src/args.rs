//! Command-line argument definitions for the kintree CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the export format,
//! configuration file selection, and logging verbosity.

use clap::Parser;

use kintree::family::ExportFormat;

/// Command-line arguments for the kintree family tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the family data file (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Output file; defaults to `<title>.<format>` in the current directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export format (svg, png, jpeg), overriding the data file's setting
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Member id to draw as selected
    #[arg(long)]
    pub select: Option<String>,
}
