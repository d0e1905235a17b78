//! drawdeck - Resolve draw.io diagrams into render-ready slide decks.
//!
//! Parsing, resolution, and export for draw.io / mxGraph XML files. Every
//! page of the input becomes one slide whose shapes, connectors and labels
//! carry explicit geometry and styling.

pub mod config;
pub mod deck;
pub mod export;
pub mod resolve;

mod error;

pub use drawdeck_core::{color, draw, geometry, style, text};
pub use drawdeck_parser::Document;

pub use error::DrawdeckError;

use std::{fs, io::Write, path::Path};

use log::{debug, info, trace};

use config::AppConfig;
use deck::Deck;
use export::ExportFormat;
use resolve::ResolveOptions;

/// Builder for converting draw.io diagrams into slide decks.
///
/// This provides an API for processing diagrams through the parsing,
/// resolution, and export stages.
///
/// # Examples
///
/// ```rust,no_run
/// use drawdeck::{DeckBuilder, config::AppConfig, export::ExportFormat};
///
/// let xml = std::fs::read_to_string("flowchart.drawio").expect("Failed to read");
///
/// // With custom config
/// let builder = DeckBuilder::new(AppConfig::default());
///
/// // Parse XML to positioned pages
/// let document = builder.parse(&xml).expect("Failed to parse");
///
/// // Resolve pages into slides
/// let deck = builder.resolve(&document).expect("Failed to resolve");
///
/// // Render the deck to SVG
/// let svg = builder.render(&deck, ExportFormat::Svg).expect("Failed to render");
///
/// // Or use default config
/// let builder = DeckBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct DeckBuilder {
    config: AppConfig,
}

impl DeckBuilder {
    /// Create a new deck builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including routing, style and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse draw.io XML into a document of positioned pages.
    ///
    /// # Arguments
    ///
    /// * `xml` - The contents of a `.drawio` file or a bare `mxGraphModel`
    ///
    /// # Errors
    ///
    /// Returns [`DrawdeckError::Format`] for malformed XML, a missing graph
    /// model, or a cyclic parent chain. The error keeps `xml` for reporting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use drawdeck::DeckBuilder;
    ///
    /// let xml = r#"<mxGraphModel><root><mxCell id="0"/></root></mxGraphModel>"#;
    /// let document = DeckBuilder::default().parse(xml).expect("Failed to parse");
    /// assert_eq!(document.pages().len(), 1);
    /// ```
    pub fn parse(&self, xml: &str) -> Result<Document, DrawdeckError> {
        info!(bytes = xml.len(); "Parsing diagram");

        let document =
            drawdeck_parser::parse(xml).map_err(|err| DrawdeckError::new_format_error(err, xml))?;

        debug!(pages = document.pages().len(); "Diagram parsed successfully");
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Resolve every page of a document into a slide.
    ///
    /// Edges whose endpoints do not resolve are dropped. Invalid docking sites
    /// fall back to the top sites. Neither stops the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`DrawdeckError::Config`] if the style configuration holds an
    /// invalid color.
    pub fn resolve(&self, document: &Document) -> Result<Deck, DrawdeckError> {
        let options = ResolveOptions::from_config(&self.config).map_err(DrawdeckError::Config)?;

        let slides: Vec<_> = document
            .pages()
            .iter()
            .map(|page| resolve::resolve_page(page, &options))
            .collect();

        info!(slides = slides.len(); "Deck resolved");
        Ok(Deck::new(slides))
    }

    /// Render a deck in the given output format.
    ///
    /// # Errors
    ///
    /// Returns [`DrawdeckError::Export`] if the exporter cannot be created or
    /// fails to render.
    pub fn render(&self, deck: &Deck, format: ExportFormat) -> Result<String, DrawdeckError> {
        info!(format:?; "Rendering deck");
        let exporter = format.exporter(&self.config)?;
        let output = exporter.render(deck)?;
        debug!(bytes = output.len(); "Deck rendered");
        Ok(output)
    }

    /// Parse, resolve, and render in one step.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use drawdeck::{DeckBuilder, export::ExportFormat};
    ///
    /// let xml = r#"<mxGraphModel><root>
    ///     <mxCell id="0"/><mxCell id="1" parent="0"/>
    ///     <mxCell id="a" value="Hi" vertex="1" parent="1">
    ///         <mxGeometry x="0" y="0" width="80" height="40" as="geometry"/>
    ///     </mxCell>
    /// </root></mxGraphModel>"#;
    ///
    /// let svg = DeckBuilder::default()
    ///     .convert(xml, ExportFormat::Svg)
    ///     .expect("Failed to convert");
    /// assert!(svg.contains("Hi"));
    /// ```
    pub fn convert(&self, xml: &str, format: ExportFormat) -> Result<String, DrawdeckError> {
        let document = self.parse(xml)?;
        let deck = self.resolve(&document)?;
        self.render(&deck, format)
    }

    /// Convert the diagram at `input` and write the result to `output`.
    ///
    /// The format is chosen from the extension of `output`. The output is
    /// first written to a temporary file next to it and then moved into place,
    /// so a failed conversion leaves no file behind.
    ///
    /// # Errors
    ///
    /// Returns [`DrawdeckError::Io`] if reading or writing fails, and any
    /// error of [`DeckBuilder::convert`].
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<(), DrawdeckError> {
        let format = ExportFormat::from_path(output)?;

        info!(input:? = input; "Reading diagram file");
        let xml = fs::read_to_string(input)?;
        let rendered = self.convert(&xml, format)?;

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(rendered.as_bytes())?;
        file.persist(output).map_err(|err| DrawdeckError::Io(err.error))?;

        info!(output:? = output; "Output written");
        Ok(())
    }
}
