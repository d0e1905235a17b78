use serde::Serialize;

use crate::{draw::DockingSite, geometry::Point};

/// Defines the visual style of connector paths.
///
/// - `Straight`: a single segment between the endpoints
/// - `Orthogonal`: horizontal and vertical segments only (an elbow)
/// - `Curved`: a smooth cubic bezier
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    #[default]
    Straight,
    Orthogonal,
    Curved,
}

impl Routing {
    /// SVG path data from `start` to `end`.
    ///
    /// `sites` are the source and target docking sites. Bent paths leave and
    /// enter each shape perpendicular to the edge it docks on.
    pub fn path_data(self, start: Point, end: Point, sites: (DockingSite, DockingSite)) -> String {
        match self {
            Self::Straight => format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
            Self::Curved => curved_path_data(start, end, sites),
            Self::Orthogonal => orthogonal_path_data(start, end, sites),
        }
    }
}

/// Cubic bezier with each control point pulled out along its site's normal.
fn curved_path_data(start: Point, end: Point, sites: (DockingSite, DockingSite)) -> String {
    let half = end.sub_point(start).scale(0.5);
    let ctrl1 = if sites.0.is_vertical() {
        Point::new(start.x(), start.y() + half.y())
    } else {
        Point::new(start.x() + half.x(), start.y())
    };
    let ctrl2 = if sites.1.is_vertical() {
        Point::new(end.x(), end.y() - half.y())
    } else {
        Point::new(end.x() - half.x(), end.y())
    };

    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x(),
        start.y(),
        ctrl1.x(),
        ctrl1.y(),
        ctrl2.x(),
        ctrl2.y(),
        end.x(),
        end.y()
    )
}

/// Elbow path made of horizontal and vertical segments.
///
/// Sites of the same orientation get three segments bending at the midpoint.
/// Mixed orientations get a single corner, so the last segment still meets
/// the target edge head on.
fn orthogonal_path_data(start: Point, end: Point, sites: (DockingSite, DockingSite)) -> String {
    let mid = start.midpoint(end);

    match (sites.0.is_horizontal(), sites.1.is_horizontal()) {
        (true, false) => format!(
            "M {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            end.x(),
            start.y(),
            end.x(),
            end.y()
        ),
        (false, true) => format!(
            "M {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            start.x(),
            end.y(),
            end.x(),
            end.y()
        ),
        (true, true) => format!(
            "M {} {} L {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            mid.x(),
            start.y(),
            mid.x(),
            end.y(),
            end.x(),
            end.y()
        ),
        (false, false) => format!(
            "M {} {} L {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            start.x(),
            mid.y(),
            end.x(),
            mid.y(),
            end.x(),
            end.y()
        ),
    }
}
