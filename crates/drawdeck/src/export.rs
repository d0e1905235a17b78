//! Export functionality for drawdeck decks.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a resolved [`Deck`] into an output format. It is the final
//! stage in the drawdeck pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! XML Text
//!     ↓ parse
//! Pages of positioned cells
//!     ↓ resolve
//! Deck
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - one SVG document with every slide stacked vertically
//! - [`json`] - the resolved deck serialized as JSON
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`DrawdeckError::Export`] at the crate boundary.
//!
//! [`DrawdeckError::Export`]: crate::DrawdeckError::Export

pub mod json;
pub mod svg;

use std::path::Path;

use crate::{config::AppConfig, deck::Deck};

/// Abstraction for deck export backends.
///
/// Implementors render a [`Deck`] into a specific output format. Writing the
/// result is left to the caller so that it can be done atomically.
pub trait Exporter {
    /// Renders a deck to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the deck cannot be converted to the
    /// target format.
    fn render(&self, deck: &Deck) -> Result<String, Error>;
}

/// Output formats with a built-in [`Exporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Json,
}

impl ExportFormat {
    /// Picks the format from an output file's extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Creates the exporter for this format.
    pub fn exporter(self, config: &AppConfig) -> Result<Box<dyn Exporter>, Error> {
        match self {
            Self::Svg => Ok(Box::new(svg::SvgExporter::from_config(config)?)),
            Self::Json => Ok(Box::new(json::JsonExporter::new())),
        }
    }
}

/// Errors that can occur during deck export.
///
/// This type is converted into [`DrawdeckError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`DrawdeckError::Export`]: crate::DrawdeckError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// The output path does not name a known format.
    UnsupportedFormat(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::UnsupportedFormat(path) => write!(
                f,
                "Unsupported output format for `{path}`, expected a .svg or .json file"
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.svg")).unwrap(), ExportFormat::Svg);
        assert_eq!(ExportFormat::from_path(Path::new("dir/OUT.JSON")).unwrap(), ExportFormat::Json);
        assert!(matches!(
            ExportFormat::from_path(Path::new("out.pptx")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(ExportFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("deck.pdf".to_string());
        assert!(err.to_string().contains("deck.pdf"));
        assert_eq!(Error::Render("bad".into()).to_string(), "Render error: bad");
    }
}
