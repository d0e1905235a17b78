//! Error types for drawdeck operations.
//!
//! This module provides the main error type [`DrawdeckError`] which wraps
//! the error conditions that can occur while converting a diagram.

use std::io;

use thiserror::Error;

use drawdeck_parser::FormatError;

/// The main error type for drawdeck operations.
///
/// # Diagnostic Variants
///
/// The `Format` variant keeps the XML source next to the error so that the
/// error's span can be rendered as a labeled snippet.
#[derive(Debug, Error)]
pub enum DrawdeckError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Format { err: FormatError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for DrawdeckError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl DrawdeckError {
    /// Create a new `Format` error with the associated XML source.
    pub fn new_format_error(err: FormatError, src: impl Into<String>) -> Self {
        Self::Format {
            err,
            src: src.into(),
        }
    }
}
