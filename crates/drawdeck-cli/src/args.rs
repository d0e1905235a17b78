//! Command-line argument definitions for the drawdeck CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The [`Command`] selects what to do; the global options
//! control configuration file selection and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the drawdeck converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a draw.io diagram into a slide deck
    Convert {
        /// Path to the input .drawio or .xml file
        input: String,

        /// Path to the output file; the extension (.svg or .json) selects the format
        output: String,
    },
}
