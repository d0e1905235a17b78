//! CLI logic for the drawdeck converter.
//!
//! This module contains the command dispatch behind the `drawdeck` binary.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::path::Path;

use log::info;

use drawdeck::{DeckBuilder, DrawdeckError};

/// Run the drawdeck CLI application
///
/// Loads the configuration, then runs the selected command. `convert` reads
/// the input diagram, resolves every page into a slide, and writes the deck
/// in the format named by the output extension.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DrawdeckError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or unsupported diagram files
/// - Unsupported output formats and rendering errors
pub fn run(args: &Args) -> Result<(), DrawdeckError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DeckBuilder::new(app_config);

    match &args.command {
        Command::Convert { input, output } => {
            info!(
                input_path = input,
                output_path = output;
                "Converting diagram"
            );

            builder.convert_file(Path::new(input), Path::new(output))?;

            info!(output_file = output; "Deck exported successfully");
        }
    }

    Ok(())
}
