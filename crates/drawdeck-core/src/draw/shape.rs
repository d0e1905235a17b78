//! Shape categories and their SVG outlines.

use serde::Serialize;
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{DockingSite, StrokeDefinition},
    geometry::Bounds,
};

/// Outline category of a shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Diamond,
    Triangle,
    Hexagon,
    Cloud,
    Cylinder,
    Actor,
    Note,
    Parallelogram,
    Trapezoid,
    TextBox,
}

impl ShapeKind {
    /// Looks up a draw.io shape name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use drawdeck_core::draw::ShapeKind;
    /// assert_eq!(ShapeKind::from_name("rhombus"), Some(ShapeKind::Diamond));
    /// assert_eq!(ShapeKind::from_name("umlActor"), Some(ShapeKind::Actor));
    /// assert_eq!(ShapeKind::from_name("swimlane"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "rectangle" | "rect" | "process" => Self::Rectangle,
            "rounded" => Self::RoundedRectangle,
            "ellipse" | "doubleEllipse" => Self::Ellipse,
            "rhombus" | "decision" => Self::Diamond,
            "triangle" => Self::Triangle,
            "hexagon" => Self::Hexagon,
            "cloud" => Self::Cloud,
            "cylinder" | "cylinder3" | "datastore" => Self::Cylinder,
            "actor" | "umlActor" => Self::Actor,
            "note" => Self::Note,
            "parallelogram" => Self::Parallelogram,
            "trapezoid" => Self::Trapezoid,
            "text" => Self::TextBox,
            _ => return None,
        };
        Some(kind)
    }

    /// Docking sites that lie on this shape's outline.
    ///
    /// A triangle's left and right bounding-box midpoints are off its outline.
    pub fn supported_sites(self) -> &'static [DockingSite] {
        match self {
            Self::Triangle => &[DockingSite::Top, DockingSite::Bottom],
            _ => &DockingSite::ALL,
        }
    }

    /// Whether `site` can be used on this shape.
    pub fn supports_site(self, site: DockingSite) -> bool {
        self.supported_sites().contains(&site)
    }

    /// Renders the outline filling `bounds`.
    pub fn render_to_svg(
        self,
        bounds: Bounds,
        fill: Option<Color>,
        stroke: Option<&StrokeDefinition>,
    ) -> Box<dyn svg::Node> {
        let x = bounds.min_x();
        let y = bounds.min_y();
        let w = bounds.width();
        let h = bounds.height();

        let fill_value = fill.map_or_else(|| "none".to_string(), Color::to_hex);
        let fill_opacity = fill.map_or(1.0, |color| color.alpha());

        macro_rules! finish {
            ($element:expr) => {{
                let element = $element
                    .set("fill", fill_value)
                    .set("fill-opacity", fill_opacity);
                match stroke {
                    Some(stroke) => {
                        Box::new(crate::apply_stroke!(element, stroke)) as Box<dyn svg::Node>
                    }
                    None => Box::new(element.set("stroke", "none")),
                }
            }};
        }

        match self {
            Self::Rectangle | Self::TextBox => finish!(svg_element::Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", w)
                .set("height", h)),
            Self::RoundedRectangle => finish!(svg_element::Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", w)
                .set("height", h)
                .set("rx", (w.min(h) * 0.15).min(10.0))),
            Self::Ellipse => {
                let center = bounds.center();
                finish!(svg_element::Ellipse::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("rx", w / 2.0)
                    .set("ry", h / 2.0))
            }
            Self::Cylinder => {
                let ry = (h * 0.1).min(15.0);
                let d = format!(
                    "M {x} {top} A {rx} {ry} 0 0 1 {right} {top} L {right} {bottom} \
                     A {rx} {ry} 0 0 1 {x} {bottom} Z M {x} {top} A {rx} {ry} 0 0 0 {right} {top}",
                    top = y + ry,
                    bottom = y + h - ry,
                    right = x + w,
                    rx = w / 2.0,
                );
                finish!(svg_element::Path::new().set("d", d))
            }
            Self::Cloud => {
                let d = format!(
                    "M {a} {b} C {c} {b}, {c} {d}, {e} {d} C {e} {f}, {g} {f}, {h2} {d} \
                     C {i} {d}, {i} {b}, {h2} {b} C {h2} {j}, {a2} {j}, {a} {b} Z",
                    a = x + w * 0.25,
                    b = y + h * 0.8,
                    c = x,
                    d = y + h * 0.45,
                    e = x + w * 0.25,
                    f = y + h * 0.05,
                    g = x + w * 0.8,
                    h2 = x + w * 0.8,
                    i = x + w,
                    j = y + h,
                    a2 = x + w * 0.25,
                );
                finish!(svg_element::Path::new().set("d", d))
            }
            Self::Actor => {
                let head = h * 0.25;
                let cx = x + w / 2.0;
                let d = format!(
                    "M {cx} {y} A {r} {r2} 0 1 1 {cx} {hy} A {r} {r2} 0 1 1 {cx} {y} Z \
                     M {cx} {hy} L {cx} {hip} M {x} {arm} L {right} {arm} \
                     M {cx} {hip} L {x} {bottom} M {cx} {hip} L {right} {bottom}",
                    r = w / 4.0,
                    r2 = head / 2.0,
                    hy = y + head,
                    hip = y + h * 0.65,
                    arm = y + h * 0.4,
                    right = x + w,
                    bottom = y + h,
                );
                finish!(svg_element::Path::new().set("d", d))
            }
            Self::Note => {
                let fold = w.min(h).min(30.0) * 0.4;
                let d = format!(
                    "M {x} {y} L {fx} {y} L {right} {fy} L {right} {bottom} L {x} {bottom} Z \
                     M {fx} {y} L {fx} {fy} L {right} {fy}",
                    fx = x + w - fold,
                    fy = y + fold,
                    right = x + w,
                    bottom = y + h,
                );
                finish!(svg_element::Path::new().set("d", d))
            }
            Self::Diamond
            | Self::Triangle
            | Self::Hexagon
            | Self::Parallelogram
            | Self::Trapezoid => {
                let points = self
                    .polygon_points(bounds)
                    .iter()
                    .map(|(px, py)| format!("{px},{py}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                finish!(svg_element::Polygon::new().set("points", points))
            }
        }
    }

    /// Corner points for polygonal kinds; empty for the rest.
    fn polygon_points(self, bounds: Bounds) -> Vec<(f32, f32)> {
        let (x, y) = (bounds.min_x(), bounds.min_y());
        let (w, h) = (bounds.width(), bounds.height());
        let center = bounds.center();
        let inset = w * 0.2;

        match self {
            Self::Diamond => vec![
                (center.x(), y),
                (x + w, center.y()),
                (center.x(), y + h),
                (x, center.y()),
            ],
            Self::Triangle => vec![(center.x(), y), (x + w, y + h), (x, y + h)],
            Self::Hexagon => vec![
                (x + inset, y),
                (x + w - inset, y),
                (x + w, center.y()),
                (x + w - inset, y + h),
                (x + inset, y + h),
                (x, center.y()),
            ],
            Self::Parallelogram => vec![
                (x + inset, y),
                (x + w, y),
                (x + w - inset, y + h),
                (x, y + h),
            ],
            Self::Trapezoid => vec![(x + inset, y), (x + w - inset, y), (x + w, y + h), (x, y + h)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn bounds() -> Bounds {
        Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 60.0))
    }

    #[test]
    fn test_from_name_table() {
        assert_eq!(ShapeKind::from_name("rectangle"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::from_name("process"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::from_name("rounded"), Some(ShapeKind::RoundedRectangle));
        assert_eq!(ShapeKind::from_name("ellipse"), Some(ShapeKind::Ellipse));
        assert_eq!(ShapeKind::from_name("decision"), Some(ShapeKind::Diamond));
        assert_eq!(ShapeKind::from_name("triangle"), Some(ShapeKind::Triangle));
        assert_eq!(ShapeKind::from_name("hexagon"), Some(ShapeKind::Hexagon));
        assert_eq!(ShapeKind::from_name("cloud"), Some(ShapeKind::Cloud));
        assert_eq!(ShapeKind::from_name("cylinder3"), Some(ShapeKind::Cylinder));
        assert_eq!(ShapeKind::from_name("actor"), Some(ShapeKind::Actor));
        assert_eq!(ShapeKind::from_name("note"), Some(ShapeKind::Note));
        assert_eq!(ShapeKind::from_name("text"), Some(ShapeKind::TextBox));
        assert_eq!(ShapeKind::from_name("html"), None);
        assert_eq!(ShapeKind::from_name(""), None);
    }

    #[test]
    fn test_supported_sites() {
        assert!(ShapeKind::Triangle.supports_site(DockingSite::Top));
        assert!(ShapeKind::Triangle.supports_site(DockingSite::Bottom));
        assert!(!ShapeKind::Triangle.supports_site(DockingSite::Left));
        assert!(!ShapeKind::Triangle.supports_site(DockingSite::Right));
        for site in DockingSite::ALL {
            assert!(ShapeKind::Rectangle.supports_site(site));
            assert!(ShapeKind::Ellipse.supports_site(site));
        }
    }

    #[test]
    fn test_render_rectangle() {
        let stroke = StrokeDefinition::default();
        let node =
            ShapeKind::Rectangle.render_to_svg(bounds(), Some(Color::white()), Some(&stroke));
        let rendered = node.to_string();
        assert!(rendered.starts_with("<rect"));
        assert!(rendered.contains(r##"fill="#ffffff""##));
        assert!(rendered.contains(r##"stroke="#000000""##));
    }

    #[test]
    fn test_render_without_paint() {
        let node = ShapeKind::Ellipse.render_to_svg(bounds(), None, None);
        let rendered = node.to_string();
        assert!(rendered.starts_with("<ellipse"));
        assert!(rendered.contains(r#"fill="none""#));
        assert!(rendered.contains(r#"stroke="none""#));
    }

    #[test]
    fn test_polygon_points() {
        let points = ShapeKind::Diamond.polygon_points(bounds());
        assert_eq!(points, vec![(50.0, 0.0), (100.0, 30.0), (50.0, 60.0), (0.0, 30.0)]);

        let node = ShapeKind::Triangle.render_to_svg(bounds(), None, None);
        assert!(node.to_string().contains(r#"points="50,0 100,60 0,60""#));
    }

    #[test]
    fn test_every_kind_renders() {
        let kinds = [
            ShapeKind::Rectangle,
            ShapeKind::RoundedRectangle,
            ShapeKind::Ellipse,
            ShapeKind::Diamond,
            ShapeKind::Triangle,
            ShapeKind::Hexagon,
            ShapeKind::Cloud,
            ShapeKind::Cylinder,
            ShapeKind::Actor,
            ShapeKind::Note,
            ShapeKind::Parallelogram,
            ShapeKind::Trapezoid,
            ShapeKind::TextBox,
        ];
        for kind in kinds {
            assert!(!kind.render_to_svg(bounds(), None, None).to_string().is_empty());
        }
    }
}
