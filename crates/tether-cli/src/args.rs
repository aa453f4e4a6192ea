//! Command-line argument definitions for the Tether CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, layout overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Tether layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file (.toml or .json)
    #[arg(help = "Path to the input graph file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also write the final positions as JSON to this path
    #[arg(long)]
    pub positions: Option<String>,

    /// Seed for the random jitter, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulation iterations, overriding the configuration
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Render only the optimized layout instead of the side-by-side comparison
    #[arg(long)]
    pub single: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
