//! Error adapter for converting DrawdeckError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use drawdeck::DrawdeckError;
use drawdeck_parser::{FormatError, Span};

/// Adapter for a [`FormatError`] together with the XML it was found in.
pub struct FormatAdapter<'a> {
    err: &'a FormatError,
    src: &'a str,
}

impl<'a> FormatAdapter<'a> {
    /// Create a new format error adapter.
    pub fn new(err: &'a FormatError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for FormatAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for FormatAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for FormatAdapter<'_> {}

impl MietteDiagnostic for FormatAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            FormatError::Xml { .. } => "drawdeck::format::xml",
            FormatError::MissingGraphModel => "drawdeck::format::missing_model",
            FormatError::CyclicParent { .. } => "drawdeck::format::cyclic_parent",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.err
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.err
            .span()
            .map(|_| &self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let label = LabeledSpan::new_primary_with_span(
            Some(self.err.label().to_string()),
            span_to_miette(span),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-format [`DrawdeckError`] variants.
///
/// This adapter handles errors that don't carry a source location, such as
/// I/O, configuration and export errors.
pub struct ErrorAdapter<'a>(pub &'a DrawdeckError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DrawdeckError::Io(_) => "drawdeck::io",
            DrawdeckError::Format { .. } => return None,
            DrawdeckError::Config(_) => "drawdeck::config",
            DrawdeckError::Export(_) => "drawdeck::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A format error with source location information.
    Format(FormatAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Format(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Format(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Format(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Format(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Format(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Format(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a drawdeck [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`DrawdeckError`] into a reportable error.
pub fn to_reportable(err: &DrawdeckError) -> Reportable<'_> {
    match err {
        DrawdeckError::Format { err, src } => Reportable::Format(FormatAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
