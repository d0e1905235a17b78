//! Cells and pages produced by ingestion.
//!
//! A [`Cell`] mirrors one `mxCell` element. A [`Page`] holds the cells that
//! survive ingestion, already split into positioned vertices, edges and
//! extra edge labels.

use drawdeck_core::{
    geometry::{Bounds, Point, Size},
    style::Style,
};

use crate::span::Span;

/// Role of a cell within the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// A shape (`vertex="1"`). Wins when a cell claims both roles.
    Vertex,
    /// A connection (`edge="1"`).
    Edge,
    /// Everything else: the root cell and layers.
    Container,
}

/// Raw `mxGeometry` of a cell, in its parent's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    relative: bool,
    offset: Option<Point>,
}

impl Geometry {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            relative: false,
            offset: None,
        }
    }

    pub fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    pub fn with_offset(mut self, offset: Option<Point>) -> Self {
        self.offset = offset;
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether `x`/`y` are relative to an edge instead of absolute offsets.
    pub fn relative(&self) -> bool {
        self.relative
    }

    /// Pixel offset applied after relative placement.
    pub fn offset(&self) -> Option<Point> {
        self.offset
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// One `mxCell` of a page.
#[derive(Debug, Clone)]
pub struct Cell {
    pub(crate) id: String,
    pub(crate) value: String,
    pub(crate) style_raw: String,
    pub(crate) style: Style,
    pub(crate) geometry: Option<Geometry>,
    pub(crate) kind: CellKind,
    pub(crate) parent: Option<String>,
    pub(crate) source: Option<String>,
    pub(crate) target: Option<String>,
    pub(crate) span: Span,
}

impl Cell {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw label, possibly containing inline markup.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn style_raw(&self) -> &str {
        &self.style_raw
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Location of the cell element in the source.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A vertex placed in page coordinates.
#[derive(Debug, Clone)]
pub struct Vertex {
    cell: Cell,
    bounds: Bounds,
}

impl Vertex {
    pub(crate) fn new(cell: Cell, bounds: Bounds) -> Self {
        Self { cell, bounds }
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn id(&self) -> &str {
        &self.cell.id
    }

    /// Absolute bounds on the page.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// A connection between two cells.
///
/// Source and target are still raw ids here; they are checked against the
/// page's vertices during resolution.
#[derive(Debug, Clone)]
pub struct Edge {
    cell: Cell,
}

impl Edge {
    pub(crate) fn new(cell: Cell) -> Self {
        Self { cell }
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn id(&self) -> &str {
        &self.cell.id
    }
}

/// An extra label attached to an edge.
///
/// draw.io stores these as vertex children of the edge with relative geometry.
#[derive(Debug, Clone)]
pub struct EdgeLabel {
    edge_id: String,
    cell: Cell,
}

impl EdgeLabel {
    pub(crate) fn new(edge_id: String, cell: Cell) -> Self {
        Self { edge_id, cell }
    }

    /// Id of the edge this label belongs to.
    pub fn edge_id(&self) -> &str {
        &self.edge_id
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }
}

/// One independent diagram page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub(crate) name: String,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) edge_labels: Vec<EdgeLabel>,
}

impl Page {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positioned vertices in document order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Edges in document order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_labels(&self) -> &[EdgeLabel] {
        &self.edge_labels
    }

    /// Extra labels of the edge with id `edge_id`, in document order.
    pub fn labels_of<'a>(&'a self, edge_id: &'a str) -> impl Iterator<Item = &'a EdgeLabel> + 'a {
        self.edge_labels
            .iter()
            .filter(move |label| label.edge_id == edge_id)
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|vertex| vertex.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}

/// A parsed diagram document: its pages in document order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) pages: Vec<Page>,
}

impl Document {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}
