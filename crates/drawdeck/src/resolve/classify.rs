//! Style to drawing category classification.
//!
//! draw.io styles are open ended; these functions collapse them onto the
//! fixed vocabulary in [`drawdeck_core::draw`]. Unknown values never fail,
//! they fall through to a default category.

use drawdeck_core::{
    draw::{ArrowHead, ArrowKind, ArrowSize, DashStyle, Routing, ShapeKind},
    style::{Style, StyleValue},
};

fn is_switched_off(value: &StyleValue) -> bool {
    match value {
        StyleValue::Flag => false,
        StyleValue::Value(value) => value == "0" || value.eq_ignore_ascii_case("false"),
    }
}

/// Which end of a connector an arrowhead sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowEnd {
    Start,
    End,
}

impl ArrowEnd {
    fn keys(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Start => ("startArrow", "startFill", "startSize"),
            Self::End => ("endArrow", "endFill", "endSize"),
        }
    }

    /// Head used when the style does not name one. draw.io draws a classic
    /// arrow at the end of a new edge and nothing at the start.
    fn default_kind(self) -> ArrowKind {
        match self {
            Self::Start => ArrowKind::None,
            Self::End => ArrowKind::Stealth,
        }
    }
}

/// Picks the outline of a vertex.
///
/// In order: the `shape` value (for `mxgraph.*` stencils also its last dotted
/// segment), the first style key that names a shape, `rounded=1`, an
/// `ellipse` entry, and finally a plain rectangle. Keys switched off with `0`
/// or `false` are skipped by the key scan.
pub fn shape_kind(style: &Style) -> ShapeKind {
    if let Some(shape) = style.value("shape") {
        let stencil = shape
            .rsplit('.')
            .next()
            .filter(|_| shape.starts_with("mxgraph."));
        let kind = ShapeKind::from_name(shape).or_else(|| stencil.and_then(ShapeKind::from_name));
        if let Some(kind) = kind {
            return kind;
        }
    }

    let named = style
        .iter()
        .filter(|(_, value)| !is_switched_off(value))
        .find_map(|(key, _)| ShapeKind::from_name(key));
    if let Some(kind) = named {
        return kind;
    }

    if style.value("rounded") == Some("1") {
        return ShapeKind::RoundedRectangle;
    }

    if style.contains("ellipse") {
        return ShapeKind::Ellipse;
    }

    ShapeKind::Rectangle
}

/// Picks how a connector is routed.
pub fn routing(style: &Style) -> Routing {
    if style.is_enabled("curved") {
        return Routing::Curved;
    }

    match style.value("edgeStyle") {
        None | Some("") | Some("none") => Routing::Straight,
        Some(_) => Routing::Orthogonal,
    }
}

/// Collapses `dashed` and `dashPattern` onto a dash category.
///
/// A pattern whose first dash is at most 2 units long reads as dotted; a
/// pattern of four or more numbers reads as dash-dot.
pub fn dash(style: &Style) -> DashStyle {
    if !style.is_enabled("dashed") {
        return DashStyle::Solid;
    }

    let Some(pattern) = style.value("dashPattern") else {
        return DashStyle::Dashed;
    };

    let lengths: Vec<f32> = pattern
        .split([' ', ','])
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();

    match lengths.first() {
        Some(&first) if first <= 2.0 => DashStyle::Dotted,
        _ if lengths.len() >= 4 => DashStyle::DashDot,
        _ => DashStyle::Dashed,
    }
}

/// Reads the arrowhead at one end of a connector.
///
/// Unknown head names draw nothing. A fill of `0` turns the triangle family
/// into its open variant.
pub fn arrow_head(style: &Style, end: ArrowEnd) -> ArrowHead {
    let (kind_key, fill_key, size_key) = end.keys();

    let kind = match style.value(kind_key) {
        Some(name) => ArrowKind::from_name(name).unwrap_or(ArrowKind::None),
        None => end.default_kind(),
    };
    let kind = if style.value(fill_key) == Some("0") {
        kind.unfilled()
    } else {
        kind
    };

    let size = match style.number(size_key) {
        Ok(Some(hint)) => ArrowSize::from_hint(hint),
        Ok(None) | Err(_) => ArrowSize::Medium,
    };

    ArrowHead::new(kind, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(raw: &str) -> ShapeKind {
        shape_kind(&Style::parse(raw))
    }

    #[test]
    fn test_shape_from_shape_key() {
        assert_eq!(kind("shape=cylinder3;whiteSpace=wrap;"), ShapeKind::Cylinder);
        assert_eq!(kind("shape=hexagon;perimeter=hexagonPerimeter2;"), ShapeKind::Hexagon);
        assert_eq!(kind("shape=mxgraph.flowchart.decision;"), ShapeKind::Diamond);
        assert_eq!(kind("shape=mxgraph.basic.cloud"), ShapeKind::Cloud);
    }

    #[test]
    fn test_unknown_shape_falls_through() {
        assert_eq!(kind("shape=swimlane;rounded=1;"), ShapeKind::RoundedRectangle);
        assert_eq!(kind("shape=foo.ellipse;"), ShapeKind::Rectangle);
    }

    #[test]
    fn test_shape_from_flags_in_order() {
        assert_eq!(kind("rhombus;whiteSpace=wrap;html=1;"), ShapeKind::Diamond);
        assert_eq!(kind("html=1;triangle;ellipse;"), ShapeKind::Triangle);
        assert_eq!(kind("text;html=1;"), ShapeKind::TextBox);
    }

    #[test]
    fn test_shape_from_keys_with_values() {
        assert_eq!(kind("rounded=1;ellipse;"), ShapeKind::RoundedRectangle);
        assert_eq!(kind("rounded=1;whiteSpace=wrap;rhombus;"), ShapeKind::RoundedRectangle);
        assert_eq!(kind("html=1;ellipse=1;rounded=1;"), ShapeKind::Ellipse);
        assert_eq!(kind("shape=ellipse;triangle;rounded=1;"), ShapeKind::Ellipse);
    }

    #[test]
    fn test_switched_off_keys_are_skipped() {
        assert_eq!(kind("rounded=0;"), ShapeKind::Rectangle);
        assert_eq!(kind("rounded=0;rhombus;"), ShapeKind::Diamond);
        assert_eq!(kind("triangle=false;"), ShapeKind::Rectangle);
    }

    #[test]
    fn test_rounded_and_ellipse_and_default() {
        assert_eq!(kind("rounded=1;whiteSpace=wrap;"), ShapeKind::RoundedRectangle);
        assert_eq!(kind("rounded=0;"), ShapeKind::Rectangle);
        assert_eq!(kind("ellipse=1;"), ShapeKind::Ellipse);
        assert_eq!(kind("whiteSpace=wrap;html=1;"), ShapeKind::Rectangle);
        assert_eq!(kind(""), ShapeKind::Rectangle);
    }

    #[test]
    fn test_routing() {
        let routing_of = |raw: &str| routing(&Style::parse(raw));
        assert_eq!(routing_of(""), Routing::Straight);
        assert_eq!(routing_of("edgeStyle=none;"), Routing::Straight);
        assert_eq!(routing_of("edgeStyle=;"), Routing::Straight);
        assert_eq!(routing_of("edgeStyle=orthogonalEdgeStyle;"), Routing::Orthogonal);
        assert_eq!(routing_of("edgeStyle=elbowEdgeStyle;"), Routing::Orthogonal);
        assert_eq!(routing_of("edgeStyle=entityRelationEdgeStyle;"), Routing::Orthogonal);
        assert_eq!(routing_of("edgeStyle=orthogonalEdgeStyle;curved=1;"), Routing::Curved);
        assert_eq!(routing_of("curved=0;"), Routing::Straight);
    }

    #[test]
    fn test_dash() {
        let dash_of = |raw: &str| dash(&Style::parse(raw));
        assert_eq!(dash_of(""), DashStyle::Solid);
        assert_eq!(dash_of("dashed=0;dashPattern=1 4;"), DashStyle::Solid);
        assert_eq!(dash_of("dashed=1;"), DashStyle::Dashed);
        assert_eq!(dash_of("dashed=1;dashPattern=8 8;"), DashStyle::Dashed);
        assert_eq!(dash_of("dashed=1;dashPattern=1 4;"), DashStyle::Dotted);
        assert_eq!(dash_of("dashed=1;dashPattern=12 4 1 4;"), DashStyle::DashDot);
        assert_eq!(dash_of("dashed=1;dashPattern=abc;"), DashStyle::Dashed);
    }

    #[test]
    fn test_arrow_defaults() {
        let style = Style::parse("");
        assert_eq!(arrow_head(&style, ArrowEnd::Start).kind(), ArrowKind::None);
        assert_eq!(arrow_head(&style, ArrowEnd::End).kind(), ArrowKind::Stealth);
        assert_eq!(arrow_head(&style, ArrowEnd::End).size(), ArrowSize::Medium);
    }

    #[test]
    fn test_arrow_table_fill_and_size() {
        let style = Style::parse(
            "startArrow=diamondThin;startFill=0;startSize=14;endArrow=block;endFill=0;endSize=4;",
        );
        let start = arrow_head(&style, ArrowEnd::Start);
        assert_eq!(start.kind(), ArrowKind::Diamond);
        assert_eq!(start.size(), ArrowSize::Large);

        let end = arrow_head(&style, ArrowEnd::End);
        assert_eq!(end.kind(), ArrowKind::TriangleOpen);
        assert_eq!(end.size(), ArrowSize::Small);
    }

    #[test]
    fn test_arrow_unknown_and_bad_size() {
        let style = Style::parse("endArrow=ERmandOne;startArrow=oval;startSize=big;");
        assert_eq!(arrow_head(&style, ArrowEnd::End).kind(), ArrowKind::None);
        let start = arrow_head(&style, ArrowEnd::Start);
        assert_eq!(start.kind(), ArrowKind::Oval);
        assert_eq!(start.size(), ArrowSize::Medium);
    }
}
