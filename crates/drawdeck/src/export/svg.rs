//! SVG export of a deck.
//!
//! Every slide becomes a `<g class="slide">` group. Slides are stacked top to
//! bottom with a gap between them, and each slide's content is shifted so
//! that its bounds start at the slide margin. Arrowhead markers are shared
//! through a single `<defs>` block.

use indexmap::IndexMap;
use log::{debug, info};
use svg::{
    Document, Node,
    node::element::{self as svg_element, Element},
};

use drawdeck_core::{
    apply_stroke,
    color::Color,
    draw::{ArrowHead, StrokeDefinition},
    geometry::{Bounds, Point, Size},
    text::StyledRun,
};

use super::{Error, Exporter};
use crate::{
    config::{AppConfig, ExportConfig},
    deck::{ConnectorSpec, Deck, LabelSpec, ShapeSpec, Slide},
};

const DEFAULT_FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
/// Line advance in `em`.
const LINE_HEIGHT_EM: f32 = 1.2;

/// Renders decks as a single SVG document.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    export: ExportConfig,
    background: Option<Color>,
    font_size: f32,
}

impl SvgExporter {
    pub fn new(export: ExportConfig, background: Option<Color>, font_size: f32) -> Self {
        Self {
            export,
            background,
            font_size,
        }
    }

    /// Creates an exporter from the export and style sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let background = config.style().background_color().map_err(Error::Render)?;
        Ok(Self::new(
            config.export().clone(),
            background,
            config.style().font_size(),
        ))
    }

    /// Calculate the size of a slide: its content plus a margin on every side.
    fn slide_size(&self, content: Option<Bounds>) -> Size {
        let margin = self.export.margin();
        let content = content.map(Bounds::to_size).unwrap_or_default();
        Size::new(
            margin.mul_add(2.0, content.width()),
            margin.mul_add(2.0, content.height()),
        )
    }

    /// Renders the complete deck to an SVG document.
    fn render_document(&self, deck: &Deck) -> Document {
        let mut markers = IndexMap::new();
        let mut groups = Vec::with_capacity(deck.slides().len());
        let mut width: f32 = 0.0;
        let mut offset_y: f32 = 0.0;

        for (index, slide) in deck.slides().iter().enumerate() {
            if index > 0 {
                offset_y += self.export.slide_gap();
            }
            let content = slide.content_bounds();
            let size = self.slide_size(content);

            groups.push(self.render_slide(slide, content, size, offset_y, &mut markers));
            width = width.max(size.width());
            offset_y += size.height();
        }

        if deck.is_empty() {
            let size = self.slide_size(None);
            width = size.width();
            offset_y = size.height();
        }
        debug!("Final SVG dimensions: {width}x{offset_y}");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {offset_y}"))
            .set("width", width)
            .set("height", offset_y);

        if !markers.is_empty() {
            doc = doc.add(
                markers
                    .into_values()
                    .fold(svg_element::Definitions::new(), |defs, marker| defs.add(marker)),
            );
        }

        groups.into_iter().fold(doc, |doc, group| doc.add(group))
    }

    /// Renders one slide as a translated group.
    fn render_slide(
        &self,
        slide: &Slide,
        content: Option<Bounds>,
        size: Size,
        offset_y: f32,
        markers: &mut IndexMap<String, svg_element::Marker>,
    ) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "slide")
            .set("data-name", slide.name())
            .set("transform", format!("translate(0, {offset_y})"));

        if let Some(background) = self.background {
            group = group.add(
                svg_element::Rectangle::new()
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", background.to_hex())
                    .set("fill-opacity", background.alpha()),
            );
        }

        let origin = content.map(Bounds::min_point).unwrap_or_default();
        let margin = self.export.margin();
        let mut content_group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", margin - origin.x(), margin - origin.y()),
        );

        for shape in slide.shapes() {
            content_group = content_group.add(self.render_shape(shape));
        }
        for connector in slide.connectors() {
            content_group = content_group.add(self.render_connector(connector, markers));
        }

        group.add(content_group)
    }

    fn render_shape(&self, shape: &ShapeSpec) -> svg_element::Group {
        let stroke = shape
            .stroke()
            .map(|color| StrokeDefinition::new(color, shape.stroke_width()));

        let group = svg_element::Group::new()
            .set("data-id", shape.id())
            .add(shape.kind().render_to_svg(shape.bounds(), shape.fill(), stroke.as_ref()));

        if shape.label().is_empty() {
            return group;
        }
        group.add(self.render_text(shape.label(), shape.bounds().center()))
    }

    fn render_connector(
        &self,
        connector: &ConnectorSpec,
        markers: &mut IndexMap<String, svg_element::Marker>,
    ) -> svg_element::Group {
        let geometry = connector.geometry();
        let d = connector
            .routing()
            .path_data(geometry.start(), geometry.end(), connector.sites());
        let path = svg_element::Path::new().set("d", d).set("fill", "none");

        let path = match connector.stroke() {
            Some(color) => {
                let stroke = StrokeDefinition::new(color, connector.stroke_width())
                    .with_dash(connector.dash());
                let mut path = apply_stroke!(path, &stroke);
                if let Some(id) = register_marker(markers, connector.start_arrow(), color, true) {
                    path = path.set("marker-start", format!("url(#{id})"));
                }
                if let Some(id) = register_marker(markers, connector.end_arrow(), color, false) {
                    path = path.set("marker-end", format!("url(#{id})"));
                }
                path
            }
            None => path.set("stroke", "none"),
        };

        connector.labels().iter().fold(
            svg_element::Group::new()
                .set("data-id", connector.id())
                .add(path),
            |group, label| group.add(self.render_label(label)),
        )
    }

    fn render_label(&self, label: &LabelSpec) -> svg_element::Group {
        let bounds = label.bounds();
        let background = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", "white")
            .set("fill-opacity", 0.8)
            .set("rx", 3.0);

        svg_element::Group::new()
            .set("class", "label")
            .add(background)
            .add(self.render_text(label.runs(), label.anchor()))
    }

    /// Renders runs as centered lines around `center`.
    fn render_text(&self, runs: &[StyledRun], center: Point) -> svg_element::Text {
        let lines = split_lines(runs);
        let first_dy = -(lines.len().saturating_sub(1) as f32) * LINE_HEIGHT_EM / 2.0;

        let mut text = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", DEFAULT_FONT_FAMILY)
            .set("font-size", self.font_size);

        for (index, line) in lines.iter().enumerate() {
            let dy = if index == 0 { first_dy } else { LINE_HEIGHT_EM };
            let mut line_span = Element::new("tspan");
            line_span.assign("x", center.x());
            line_span.assign("dy", format!("{dy}em"));
            for run in line {
                line_span.append(run_span(run));
            }
            text = text.add(line_span);
        }

        text
    }
}

impl Exporter for SvgExporter {
    fn render(&self, deck: &Deck) -> Result<String, Error> {
        info!(slides = deck.slides().len(); "Rendering SVG document");
        let doc = self.render_document(deck);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}

/// Adds the marker for `head` to `markers` once and returns its id.
fn register_marker(
    markers: &mut IndexMap<String, svg_element::Marker>,
    head: ArrowHead,
    color: Color,
    at_start: bool,
) -> Option<String> {
    let marker = head.create_marker(color, at_start)?;
    let id = head.marker_id(color, at_start);
    markers.entry(id.clone()).or_insert(marker);
    Some(id)
}

/// Groups runs into lines, splitting at line-break runs and embedded newlines.
fn split_lines(runs: &[StyledRun]) -> Vec<Vec<StyledRun>> {
    let mut lines = vec![Vec::new()];
    for run in runs {
        let mut pieces = run.text().split('\n').peekable();
        while let Some(piece) = pieces.next() {
            if !piece.is_empty() {
                let line = lines.len() - 1;
                lines[line].push(StyledRun::new(piece, run.format().clone()));
            }
            if pieces.peek().is_some() {
                lines.push(Vec::new());
            }
        }
    }
    lines
}

fn run_span(run: &StyledRun) -> Element {
    let format = run.format();
    let mut span = Element::new("tspan");
    if format.bold() {
        span.assign("font-weight", "bold");
    }
    if format.italic() {
        span.assign("font-style", "italic");
    }
    if format.underline() {
        span.assign("text-decoration", "underline");
    }
    span.assign("fill", format.color().to_hex());
    if let Some(size) = format.size() {
        span.assign("font-size", size);
    }
    span.append(svg::node::Text::new(run.text()));
    span
}
