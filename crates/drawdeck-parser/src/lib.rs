//! # drawdeck Parser
//!
//! Reads draw.io (mxGraph) XML into pages of positioned cells. This crate
//! turns the nested, parent-relative cell tree into flat lists of vertices
//! with absolute bounds, edges, and extra edge labels.
//!
//! ## Usage
//!
//! ```
//! # use drawdeck_parser::{parse, FormatError};
//!
//! fn main() -> Result<(), FormatError> {
//!     let xml = r#"
//!         <mxGraphModel><root>
//!             <mxCell id="0"/>
//!             <mxCell id="1" parent="0"/>
//!             <mxCell id="a" value="Start" vertex="1" parent="1">
//!                 <mxGeometry x="40" y="40" width="120" height="60" as="geometry"/>
//!             </mxCell>
//!         </root></mxGraphModel>
//!     "#;
//!
//!     let document = parse(xml)?;
//!     assert_eq!(document.pages()[0].vertices().len(), 1);
//!     Ok(())
//! }
//! ```

mod error;
mod ingest;
pub mod model;
mod position;
mod span;

pub use error::FormatError;
pub use model::{Cell, CellKind, Document, Edge, EdgeLabel, Geometry, Page, Vertex};
pub use span::Span;

use log::{debug, info};

/// Parse diagram XML into a [`Document`].
///
/// The pipeline runs in three steps:
///
/// 1. **Tokenize** - Build the XML tree with `roxmltree`
/// 2. **Locate** - Find one graph model per page (root model, `diagram`
///    wrappers, or a direct model child of the root)
/// 3. **Position** - Index each page's cells by id and resolve absolute
///    vertex bounds through the parent chain
///
/// Pages are independent: ids only need to be unique within a page.
///
/// # Errors
///
/// Returns [`FormatError::Xml`] for malformed XML,
/// [`FormatError::MissingGraphModel`] when no page has an inline model, and
/// [`FormatError::CyclicParent`] when a cell is nested inside itself.
pub fn parse(xml: &str) -> Result<Document, FormatError> {
    // Step 1: Tokenize
    let tree = roxmltree::Document::parse(xml).map_err(|err| FormatError::xml(err, xml))?;
    debug!("XML parsed successfully");

    // Step 2: Locate graph models
    let models = ingest::locate_models(tree.root_element())?;
    info!(pages = models.len(); "Found graph models");

    // Step 3: Read cells and position each page
    let pages = models
        .into_iter()
        .map(|model_ref| {
            let cells = ingest::read_cells(model_ref.model);
            position::build_page(model_ref.name, cells)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Document { pages })
}
