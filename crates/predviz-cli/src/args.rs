//! Command-line argument definitions for the Predviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select where the formula comes from, where the
//! SVG goes, the configuration file and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the Predviz formula diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a file holding the formula; stdin is read when neither this
    /// nor `--formula` is given
    #[arg(help = "Path to the input file")]
    pub input: Option<String>,

    /// Formula text given inline
    #[arg(short = 'e', long, conflicts_with = "input")]
    pub formula: Option<String>,

    /// Path to the output SVG file, `-` for stdout
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
