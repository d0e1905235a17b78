//! Stroke and dash definitions.
//!
//! - [`DashStyle`]: the supported dash categories
//! - [`StrokeDefinition`]: color, width and dash of a line or outline
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `dash` | `stroke-dasharray` | `"6,4"`, `"1,3"` |

use serde::Serialize;

use crate::color::Color;

/// Dash category of a line.
///
/// Arbitrary draw.io dash patterns collapse onto one of these.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    /// Continuous line (default)
    #[default]
    Solid,
    /// Equal dashes and gaps
    Dashed,
    /// Short dots
    Dotted,
    /// Alternating long dash and dot
    DashDot,
}

impl DashStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
            Self::Dotted => Some("1,3"),
            Self::DashDot => Some("8,4,1,4"),
        }
    }
}

/// A stroke for rendering lines and shape outlines.
///
/// # Examples
///
/// ```
/// use drawdeck_core::{color::Color, draw::{DashStyle, StrokeDefinition}};
///
/// let stroke = StrokeDefinition::new(Color::new("red").unwrap(), 2.0)
///     .with_dash(DashStyle::Dotted);
/// assert_eq!(stroke.width(), 2.0);
/// assert_eq!(stroke.dash(), DashStyle::Dotted);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    dash: DashStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: DashStyle::Solid,
        }
    }

    /// Returns the same stroke with a different dash style.
    pub fn with_dash(mut self, dash: DashStyle) -> Self {
        self.dash = dash;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the dash style.
    pub fn dash(&self) -> DashStyle {
        self.dash
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width, and the dash pattern when not solid.
///
/// # Examples
///
/// ```
/// use drawdeck_core::{color::Color, draw::StrokeDefinition};
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new()
///     .set("width", 100)
///     .set("height", 50);
///
/// let rect = drawdeck_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_hex())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.dash().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
