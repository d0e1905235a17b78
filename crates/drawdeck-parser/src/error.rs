use thiserror::Error;

use crate::span::{Span, offset_of};

/// A fatal problem with the structure of a diagram document.
///
/// Every variant that can point at the source carries a [`Span`] so callers
/// can render a labeled diagnostic.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input is not well-formed XML.
    #[error("malformed XML: {source}")]
    Xml {
        #[source]
        source: roxmltree::Error,
        span: Span,
    },

    /// Neither the root nor any diagram wrapper holds an `mxGraphModel`.
    #[error("no mxGraphModel found in document")]
    MissingGraphModel,

    /// Following the parent chain of a cell leads back to a cell already visited.
    #[error("cell `{cell_id}` has a cyclic parent chain")]
    CyclicParent { cell_id: String, span: Span },
}

impl FormatError {
    pub(crate) fn xml(source: roxmltree::Error, input: &str) -> Self {
        let pos = source.pos();
        let span = Span::point(offset_of(input, pos.row, pos.col));
        Self::Xml { source, span }
    }

    /// The source location of the problem, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Xml { span, .. } | Self::CyclicParent { span, .. } => Some(*span),
            Self::MissingGraphModel => None,
        }
    }

    /// A short label for the span in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Xml { .. } => "syntax error here",
            Self::MissingGraphModel => "missing graph model",
            Self::CyclicParent { .. } => "cell declared here",
        }
    }

    /// Suggestion for fixing the problem.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::Xml { .. } => None,
            Self::MissingGraphModel => Some(
                "compressed diagrams are not supported; save the file with \
                 File > Properties > Compressed turned off",
            ),
            Self::CyclicParent { .. } => {
                Some("make sure no cell is nested inside itself or one of its children")
            }
        }
    }
}
