//! Arrowhead categories and SVG marker generation.

use serde::Serialize;
use svg::node::element as svg_element;

use crate::color::Color;

/// Arrowhead shape category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowKind {
    #[default]
    None,
    TriangleFilled,
    TriangleOpen,
    Diamond,
    Oval,
    Stealth,
}

impl ArrowKind {
    /// Looks up a draw.io `startArrow`/`endArrow` name.
    ///
    /// Returns `None` for names outside the table.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "none" => Self::None,
            "block" | "blockThin" => Self::TriangleFilled,
            "open" | "openThin" | "async" | "openAsync" => Self::TriangleOpen,
            "classic" | "classicThin" => Self::Stealth,
            "diamond" | "diamondThin" => Self::Diamond,
            "oval" | "circle" | "circlePlus" | "dot" => Self::Oval,
            _ => return None,
        };
        Some(kind)
    }

    /// The open variant used when the style asks for an unfilled head.
    ///
    /// Only the triangle family has an open counterpart.
    pub fn unfilled(self) -> Self {
        match self {
            Self::TriangleFilled | Self::Stealth => Self::TriangleOpen,
            other => other,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TriangleFilled => "triangle",
            Self::TriangleOpen => "open",
            Self::Diamond => "diamond",
            Self::Oval => "oval",
            Self::Stealth => "stealth",
        }
    }
}

/// Arrowhead size bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ArrowSize {
    /// Buckets a draw.io `startSize`/`endSize` hint: below 6 is small, above 12 large.
    pub fn from_hint(size: f32) -> Self {
        if size < 6.0 {
            Self::Small
        } else if size > 12.0 {
            Self::Large
        } else {
            Self::Medium
        }
    }

    /// Marker edge length in pixels.
    fn marker_extent(self) -> f32 {
        match self {
            Self::Small => 6.0,
            Self::Medium => 9.0,
            Self::Large => 13.0,
        }
    }
}

/// An arrowhead at one end of a connector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArrowHead {
    kind: ArrowKind,
    size: ArrowSize,
}

impl ArrowHead {
    pub fn new(kind: ArrowKind, size: ArrowSize) -> Self {
        Self { kind, size }
    }

    pub fn kind(&self) -> ArrowKind {
        self.kind
    }

    pub fn size(&self) -> ArrowSize {
        self.size
    }

    /// Whether anything is drawn at this end.
    pub fn is_visible(&self) -> bool {
        self.kind != ArrowKind::None
    }

    /// The SVG marker id for this head in `color`.
    ///
    /// Start and end markers differ because SVG orients both along the path
    /// direction.
    pub fn marker_id(&self, color: Color, at_start: bool) -> String {
        format!(
            "arrow-{}-{}-{:?}-{}",
            if at_start { "start" } else { "end" },
            self.kind.as_str(),
            self.size,
            color.to_id_safe_string()
        )
        .to_ascii_lowercase()
    }

    /// Builds the SVG marker definition, or `None` for an invisible head.
    pub fn create_marker(&self, color: Color, at_start: bool) -> Option<svg_element::Marker> {
        let outline = match self.kind {
            ArrowKind::None => return None,
            ArrowKind::TriangleFilled | ArrowKind::TriangleOpen => "M 0 0 L 10 5 L 0 10 z",
            ArrowKind::Stealth => "M 0 0 L 10 5 L 0 10 L 3 5 z",
            ArrowKind::Diamond => "M 0 5 L 5 0 L 10 5 L 5 10 z",
            ArrowKind::Oval => "M 0 5 A 5 5 0 1 0 10 5 A 5 5 0 1 0 0 5 z",
        };
        let filled = self.kind != ArrowKind::TriangleOpen;
        let extent = self.size.marker_extent();

        let path = svg_element::Path::new()
            .set("d", outline)
            .set("stroke", color.to_hex())
            .set("stroke-width", 1)
            .set("fill", if filled { color.to_hex() } else { "white".to_string() });

        Some(
            svg_element::Marker::new()
                .set("id", self.marker_id(color, at_start))
                .set("viewBox", "0 0 10 10")
                .set("refX", if at_start { 1 } else { 9 })
                .set("refY", 5)
                .set("markerWidth", extent)
                .set("markerHeight", extent)
                .set("markerUnits", "userSpaceOnUse")
                .set("orient", if at_start { "auto-start-reverse" } else { "auto" })
                .add(path),
        )
    }
}
