//! Diagram resolution: from positioned cells to a render-ready slide.
//!
//! Resolution is where every non-trivial decision is made:
//!
//! - [`classify`] collapses free-form styles onto shape, routing, dash and
//!   arrowhead categories
//! - [`sites`] picks docking sites and builds the explicit connector geometry
//! - [`label`] anchors and sizes edge labels
//!
//! Resolution never fails. Problems with individual cells are recovered
//! locally and logged at debug level: see [`UnresolvedReference`] and
//! [`InvalidDockingSite`].

pub mod classify;
pub mod label;
pub mod sites;

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use drawdeck_core::{
    color::Color,
    draw::DockingSite,
    style::{Paint, Style},
    text::{self, StyledRun, TextFormat},
};
use drawdeck_parser::{Cell, Page, Vertex};

use crate::{
    config::{AppConfig, LabelConfig},
    deck::{ConnectorSpec, LabelSpec, ShapeSpec, Slide},
};

use classify::ArrowEnd;
use sites::Endpoint;

/// An edge endpoint that does not name a vertex of the same page.
///
/// The edge is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "edge `{edge_id}` references `{}`, which is not a shape on this page",
    .missing_id.as_deref().unwrap_or("<unset>")
)]
pub struct UnresolvedReference {
    pub edge_id: String,
    /// The referenced id, or `None` when the endpoint is not set at all.
    pub missing_id: Option<String>,
}

/// A docking site that does not lie on the outline of its shape.
///
/// Both ends of the connector fall back to [`DockingSite::Top`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shape `{shape_id}` has no {site:?} docking site")]
pub struct InvalidDockingSite {
    pub shape_id: String,
    pub site: DockingSite,
}

/// Settings used while resolving, with colors already parsed.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    font_size: f32,
    straight_tolerance: f32,
    label: LabelConfig,
}

impl ResolveOptions {
    /// Extracts the resolution settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first color that cannot be parsed.
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let style = config.style();
        Ok(Self {
            fill: style.fill_color()?,
            stroke: style.stroke_color()?,
            stroke_width: style.stroke_width(),
            font_size: style.font_size(),
            straight_tolerance: config.routing().straight_tolerance(),
            label: config.label().clone(),
        })
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        let style = crate::config::StyleConfig::default();
        Self {
            fill: Color::white(),
            stroke: Color::default(),
            stroke_width: style.stroke_width(),
            font_size: style.font_size(),
            straight_tolerance: crate::config::RoutingConfig::default().straight_tolerance(),
            label: LabelConfig::default(),
        }
    }
}

/// Resolves one page into a slide.
///
/// Shapes and connectors keep document order. Edges whose endpoints are not
/// both shapes of this page are dropped.
pub fn resolve_page(page: &Page, options: &ResolveOptions) -> Slide {
    let shapes: Vec<ShapeSpec> = page
        .vertices()
        .iter()
        .map(|vertex| resolve_shape(vertex, options))
        .collect();

    let endpoints: HashMap<&str, Endpoint> = page
        .vertices()
        .iter()
        .zip(&shapes)
        .map(|(vertex, shape)| {
            (
                vertex.id(),
                Endpoint {
                    id: vertex.id(),
                    kind: shape.kind,
                    bounds: vertex.bounds(),
                },
            )
        })
        .collect();

    let connectors: Vec<ConnectorSpec> = page
        .edges()
        .iter()
        .filter_map(|edge| {
            let cell = edge.cell();
            match lookup_endpoints(cell, &endpoints) {
                Ok((source, target)) => {
                    Some(resolve_connector(page, cell, source, target, options))
                }
                Err(err) => {
                    debug!(err:err; "Dropping edge");
                    None
                }
            }
        })
        .collect();

    debug!(
        page = page.name(),
        shapes = shapes.len(),
        connectors = connectors.len();
        "Page resolved"
    );

    Slide::new(page.name(), shapes, connectors)
}

fn resolve_shape(vertex: &Vertex, options: &ResolveOptions) -> ShapeSpec {
    let cell = vertex.cell();
    let style = cell.style();
    let kind = classify::shape_kind(style);
    trace!(cell_id = cell.id(), kind:? = kind; "Classified shape");

    ShapeSpec {
        id: cell.id().to_string(),
        kind,
        bounds: vertex.bounds(),
        fill: paint(style, "fillColor", options.fill),
        stroke: paint(style, "strokeColor", options.stroke),
        stroke_width: style.number_or("strokeWidth", options.stroke_width),
        label: runs_of(cell, options),
    }
}

fn lookup_endpoints<'a>(
    cell: &Cell,
    endpoints: &HashMap<&str, Endpoint<'a>>,
) -> Result<(Endpoint<'a>, Endpoint<'a>), UnresolvedReference> {
    let find = |id: Option<&str>| {
        id.and_then(|id| endpoints.get(id).copied())
            .ok_or_else(|| UnresolvedReference {
                edge_id: cell.id().to_string(),
                missing_id: id.map(str::to_string),
            })
    };
    Ok((find(cell.source())?, find(cell.target())?))
}

fn resolve_connector(
    page: &Page,
    cell: &Cell,
    source: Endpoint,
    target: Endpoint,
    options: &ResolveOptions,
) -> ConnectorSpec {
    let style = cell.style();
    let connection = sites::resolve_connection(
        style,
        classify::routing(style),
        source,
        target,
        options.straight_tolerance,
    );

    let source_center = source.bounds.center();
    let target_center = target.bounds.center();
    let place = |label_cell: &Cell| -> Option<LabelSpec> {
        let runs = runs_of(label_cell, options);
        if runs.is_empty() {
            return None;
        }
        Some(label::place(
            label_cell.geometry(),
            source_center,
            target_center,
            runs,
            options.font_size,
            &options.label,
        ))
    };

    let labels = std::iter::once(cell)
        .chain(page.labels_of(cell.id()).map(|label| label.cell()))
        .filter_map(place)
        .collect();

    ConnectorSpec {
        id: cell.id().to_string(),
        source_id: source.id.to_string(),
        target_id: target.id.to_string(),
        routing: connection.routing,
        dash: classify::dash(style),
        start_arrow: classify::arrow_head(style, ArrowEnd::Start),
        end_arrow: classify::arrow_head(style, ArrowEnd::End),
        stroke: paint(style, "strokeColor", options.stroke),
        stroke_width: style.number_or("strokeWidth", options.stroke_width),
        sites: connection.sites,
        geometry: connection.geometry,
        labels,
    }
}

/// Segments a cell's value with the base format taken from its style.
fn runs_of(cell: &Cell, options: &ResolveOptions) -> Vec<StyledRun> {
    if cell.value().is_empty() {
        return Vec::new();
    }
    let base = TextFormat::from_style(cell.style(), options.font_size);
    text::segment(cell.value(), base)
}

/// Resolves a paint attribute against its configured default.
fn paint(style: &Style, key: &str, default: Color) -> Option<Color> {
    match style.paint(key) {
        Paint::Default => Some(default),
        Paint::None => None,
        Paint::Color(color) => Some(color),
    }
}
