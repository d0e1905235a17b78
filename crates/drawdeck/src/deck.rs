//! Render-ready slide deck records.
//!
//! These are the output of resolution and the only input of exporters. Every
//! position is explicit: exporters draw what they are given and make no
//! geometric decisions of their own.

use serde::Serialize;

use drawdeck_core::{
    color::Color,
    draw::{ArrowHead, DashStyle, DockingSite, Routing, ShapeKind},
    geometry::{Bounds, Point},
    text::StyledRun,
};

/// A resolved deck: one slide per diagram page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// One slide with its shapes and connectors in document order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Slide {
    name: String,
    shapes: Vec<ShapeSpec>,
    connectors: Vec<ConnectorSpec>,
}

impl Slide {
    pub fn new(
        name: impl Into<String>,
        shapes: Vec<ShapeSpec>,
        connectors: Vec<ConnectorSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            shapes,
            connectors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shapes(&self) -> &[ShapeSpec] {
        &self.shapes
    }

    pub fn connectors(&self) -> &[ConnectorSpec] {
        &self.connectors
    }

    /// Looks up a shape by cell id.
    pub fn shape(&self, id: &str) -> Option<&ShapeSpec> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    /// Looks up a connector by cell id.
    pub fn connector(&self, id: &str) -> Option<&ConnectorSpec> {
        self.connectors.iter().find(|connector| connector.id == id)
    }

    /// The smallest bounds containing every shape, connector and label.
    ///
    /// Returns `None` for an empty slide.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let shapes = self.shapes.iter().map(|shape| shape.bounds);
        let connectors = self.connectors.iter().flat_map(|connector| {
            std::iter::once(connector.geometry.bounds)
                .chain(connector.labels.iter().map(|label| label.bounds))
        });
        shapes
            .chain(connectors)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// A shape placed on a slide.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeSpec {
    pub(crate) id: String,
    pub(crate) kind: ShapeKind,
    pub(crate) bounds: Bounds,
    /// `None` means no fill.
    pub(crate) fill: Option<Color>,
    /// `None` means no outline.
    pub(crate) stroke: Option<Color>,
    pub(crate) stroke_width: f32,
    pub(crate) label: Vec<StyledRun>,
}

impl ShapeSpec {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Text runs drawn inside the shape.
    pub fn label(&self) -> &[StyledRun] {
        &self.label
    }
}

/// Explicit line geometry of a connector.
///
/// `bounds` envelopes both endpoints. The flips tell a writer that draws
/// lines as bounding boxes which diagonal the line follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectorGeometry {
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) bounds: Bounds,
    pub(crate) flip_h: bool,
    pub(crate) flip_v: bool,
}

impl ConnectorGeometry {
    /// Builds the geometry of a line from `start` to `end`.
    pub fn between(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            bounds: Bounds::enclosing(start, end),
            flip_h: start.x() > end.x(),
            flip_v: start.y() > end.y(),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn flip_h(&self) -> bool {
        self.flip_h
    }

    pub fn flip_v(&self) -> bool {
        self.flip_v
    }
}

/// A connector between two shapes of the same slide.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectorSpec {
    pub(crate) id: String,
    pub(crate) source_id: String,
    pub(crate) target_id: String,
    pub(crate) routing: Routing,
    pub(crate) dash: DashStyle,
    pub(crate) start_arrow: ArrowHead,
    pub(crate) end_arrow: ArrowHead,
    pub(crate) stroke: Option<Color>,
    pub(crate) stroke_width: f32,
    pub(crate) sites: (DockingSite, DockingSite),
    pub(crate) geometry: ConnectorGeometry,
    pub(crate) labels: Vec<LabelSpec>,
}

impl ConnectorSpec {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn routing(&self) -> Routing {
        self.routing
    }

    pub fn dash(&self) -> DashStyle {
        self.dash
    }

    pub fn start_arrow(&self) -> ArrowHead {
        self.start_arrow
    }

    pub fn end_arrow(&self) -> ArrowHead {
        self.end_arrow
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Docking sites on the source and target shape.
    pub fn sites(&self) -> (DockingSite, DockingSite) {
        self.sites
    }

    pub fn geometry(&self) -> &ConnectorGeometry {
        &self.geometry
    }

    pub fn labels(&self) -> &[LabelSpec] {
        &self.labels
    }
}

/// A free-standing text box attached to a connector.
#[derive(Debug, Clone, Serialize)]
pub struct LabelSpec {
    pub(crate) anchor: Point,
    pub(crate) bounds: Bounds,
    pub(crate) runs: Vec<StyledRun>,
}

impl LabelSpec {
    /// The point the box is centered on.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }
}

#[cfg(test)]
mod tests {
    use drawdeck_core::geometry::Size;

    use super::*;

    #[test]
    fn test_connector_geometry_flips() {
        let geometry = ConnectorGeometry::between(Point::new(100.0, 10.0), Point::new(20.0, 80.0));
        assert!(geometry.flip_h());
        assert!(!geometry.flip_v());
        assert_eq!(geometry.bounds().min_point(), Point::new(20.0, 10.0));
        assert_eq!(geometry.bounds().width(), 80.0);
        assert_eq!(geometry.bounds().height(), 70.0);
    }

    #[test]
    fn test_content_bounds() {
        assert!(Slide::default().content_bounds().is_none());

        let shape = |id: &str, x: f32, y: f32| ShapeSpec {
            id: id.to_string(),
            kind: ShapeKind::Rectangle,
            bounds: Bounds::new_from_top_left(Point::new(x, y), Size::new(10.0, 10.0)),
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            label: Vec::new(),
        };
        let slide = Slide::new("s", vec![shape("a", 0.0, 0.0), shape("b", 50.0, 20.0)], Vec::new());

        let bounds = slide.content_bounds().unwrap();
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 30.0);
        assert_eq!(slide.shape("b").unwrap().id(), "b");
        assert!(slide.connector("b").is_none());
    }
}
