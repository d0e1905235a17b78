//! Connection site selection and connector geometry.
//!
//! A connector docks on one of four sites of each shape (see
//! [`DockingSite`]). Explicit `exit*`/`entry*` ratios in the edge style win;
//! otherwise a heuristic looks at how the two shapes are arranged.

use log::debug;

use drawdeck_core::{
    draw::{DockingSite, Routing, ShapeKind},
    geometry::{Bounds, Point},
    style::Style,
};

use super::InvalidDockingSite;
use crate::deck::ConnectorGeometry;

/// Ratios at or below this lie on the top/left edge; at or above `1 - EDGE_BAND`
/// on the bottom/right edge.
const EDGE_BAND: f32 = 0.1;

/// One end of a connector.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub id: &'a str,
    pub kind: ShapeKind,
    pub bounds: Bounds,
}

/// Where and how a connector is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub sites: (DockingSite, DockingSite),
    pub routing: Routing,
    pub geometry: ConnectorGeometry,
}

/// Maps a relative position on a bounding box to the site it names.
///
/// Returns `None` for points away from every edge.
pub fn site_from_ratio(x: f32, y: f32) -> Option<DockingSite> {
    if y <= EDGE_BAND {
        Some(DockingSite::Top)
    } else if x >= 1.0 - EDGE_BAND {
        Some(DockingSite::Right)
    } else if y >= 1.0 - EDGE_BAND {
        Some(DockingSite::Bottom)
    } else if x <= EDGE_BAND {
        Some(DockingSite::Left)
    } else {
        None
    }
}

/// Sites requested by the edge style for the source and target end.
///
/// An end needs both of its ratios to be valid numbers.
pub fn explicit_sites(style: &Style) -> (Option<DockingSite>, Option<DockingSite>) {
    let ratio_site = |x_key: &str, y_key: &str| {
        let x = style.number(x_key).ok().flatten()?;
        let y = style.number(y_key).ok().flatten()?;
        site_from_ratio(x, y)
    };

    (ratio_site("exitX", "exitY"), ratio_site("entryX", "entryY"))
}

/// Picks sites from the relative arrangement of two shapes.
///
/// Shapes stacked above each other (overlapping x-ranges) connect vertically,
/// shapes side by side (overlapping y-ranges) horizontally. Otherwise the
/// dominant axis of the center offset decides.
pub fn heuristic_sites(source: Bounds, target: Bounds) -> (DockingSite, DockingSite) {
    let delta = target.center().sub_point(source.center());

    let vertical = || {
        if delta.y() >= 0.0 {
            (DockingSite::Bottom, DockingSite::Top)
        } else {
            (DockingSite::Top, DockingSite::Bottom)
        }
    };
    let horizontal = || {
        if delta.x() >= 0.0 {
            (DockingSite::Right, DockingSite::Left)
        } else {
            (DockingSite::Left, DockingSite::Right)
        }
    };

    if source.overlaps_x(target) {
        vertical()
    } else if source.overlaps_y(target) {
        horizontal()
    } else if delta.x().abs() > delta.y().abs() {
        horizontal()
    } else {
        vertical()
    }
}

/// Checks both sites against the outlines they sit on.
///
/// # Errors
///
/// Returns [`InvalidDockingSite`] for the first end whose shape does not
/// support its site.
pub fn validate_sites(
    source: &Endpoint,
    target: &Endpoint,
    sites: (DockingSite, DockingSite),
) -> Result<(DockingSite, DockingSite), InvalidDockingSite> {
    for (endpoint, site) in [(source, sites.0), (target, sites.1)] {
        if !endpoint.kind.supports_site(site) {
            return Err(InvalidDockingSite {
                shape_id: endpoint.id.to_string(),
                site,
            });
        }
    }
    Ok(sites)
}

/// Replaces an orthogonal route by a straight one when the two sites face
/// each other and are aligned within `tolerance` pixels.
pub fn simplify_routing(
    routing: Routing,
    sites: (DockingSite, DockingSite),
    start: Point,
    end: Point,
    tolerance: f32,
) -> Routing {
    if routing != Routing::Orthogonal {
        return routing;
    }

    let aligned = if sites.0.is_vertical() && sites.1.is_vertical() {
        (start.x() - end.x()).abs() <= tolerance
    } else if sites.0.is_horizontal() && sites.1.is_horizontal() {
        (start.y() - end.y()).abs() <= tolerance
    } else {
        false
    };

    if aligned {
        Routing::Straight
    } else {
        routing
    }
}

/// Resolves the docking sites, final routing and geometry of a connector.
pub fn resolve_connection(
    style: &Style,
    routing: Routing,
    source: Endpoint,
    target: Endpoint,
    straight_tolerance: f32,
) -> Connection {
    let (exit, entry) = explicit_sites(style);
    let (heuristic_exit, heuristic_entry) = heuristic_sites(source.bounds, target.bounds);
    let requested = (exit.unwrap_or(heuristic_exit), entry.unwrap_or(heuristic_entry));

    let sites = validate_sites(&source, &target, requested).unwrap_or_else(|err| {
        debug!(err:err; "Falling back to the top docking site on both ends");
        (DockingSite::Top, DockingSite::Top)
    });

    let start = sites.0.point_on(source.bounds);
    let end = sites.1.point_on(target.bounds);

    Connection {
        sites,
        routing: simplify_routing(routing, sites, start, end, straight_tolerance),
        geometry: ConnectorGeometry::between(start, end),
    }
}


#[cfg(test)]
mod proptest_tests {
    use drawdeck_core::geometry::Size;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..200.0, 1.0f32..200.0)
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn check_heuristic_sites_face_each_other(source: Bounds, target: Bounds) {
        let (start, end) = heuristic_sites(source, target);
        assert_eq!(start.is_vertical(), end.is_vertical());
        assert_ne!(start, end);
    }

    fn check_swapping_ends_swaps_sites(source: Bounds, target: Bounds) {
        let forward = heuristic_sites(source, target);
        let backward = heuristic_sites(target, source);
        let delta = target.center().sub_point(source.center());
        if delta.x() != 0.0 && delta.y() != 0.0 {
            assert_eq!(forward, (backward.1, backward.0));
        }
    }

    fn check_geometry_envelops_endpoints(source: Bounds, target: Bounds) {
        let a = Endpoint { id: "a", kind: ShapeKind::Ellipse, bounds: source };
        let b = Endpoint { id: "b", kind: ShapeKind::Rectangle, bounds: target };
        let connection = resolve_connection(&Style::default(), Routing::Orthogonal, a, b, 10.0);
        let geometry = connection.geometry;

        assert_eq!(geometry.bounds().min_x(), geometry.start().x().min(geometry.end().x()));
        assert_eq!(geometry.bounds().max_y(), geometry.start().y().max(geometry.end().y()));
        assert_eq!(geometry.flip_h(), geometry.start().x() > geometry.end().x());
        assert_eq!(geometry.flip_v(), geometry.start().y() > geometry.end().y());
    }

    /// Two equal boxes stacked vertically, the lower one shifted right by `dx`.
    fn stacked(width: f32, dx: f32) -> (Endpoint<'static>, Endpoint<'static>) {
        let size = Size::new(width, 40.0);
        let upper = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
        let lower = Bounds::new_from_top_left(Point::new(dx, 200.0), size);
        (
            Endpoint { id: "upper", kind: ShapeKind::Rectangle, bounds: upper },
            Endpoint { id: "lower", kind: ShapeKind::Rectangle, bounds: lower },
        )
    }

    fn check_aligned_orthogonal_becomes_straight(width: f32, tolerance: f32, ratio: f32) {
        let (upper, lower) = stacked(width, tolerance * ratio);
        let connection =
            resolve_connection(&Style::default(), Routing::Orthogonal, upper, lower, tolerance);
        assert_eq!(connection.sites, (DockingSite::Bottom, DockingSite::Top));
        assert_eq!(connection.routing, Routing::Straight);
    }

    fn check_misaligned_orthogonal_is_kept(width: f32, tolerance: f32, ratio: f32) {
        let (upper, lower) = stacked(width, tolerance * ratio);
        let connection =
            resolve_connection(&Style::default(), Routing::Orthogonal, upper, lower, tolerance);
        assert_eq!(connection.sites, (DockingSite::Bottom, DockingSite::Top));
        assert_eq!(connection.routing, Routing::Orthogonal);
    }

    fn check_side_by_side_tolerance(dy: f32, tolerance: f32) {
        let sites = (DockingSite::Right, DockingSite::Left);
        let start = Point::new(0.0, 0.0);
        let end = Point::new(300.0, dy);
        let routing = simplify_routing(Routing::Orthogonal, sites, start, end, tolerance);
        let expected = if dy.abs() <= tolerance {
            Routing::Straight
        } else {
            Routing::Orthogonal
        };
        assert_eq!(routing, expected);
    }

    proptest! {
        #[test]
        fn heuristic_sites_face_each_other(
            source in bounds_strategy(),
            target in bounds_strategy(),
        ) {
            check_heuristic_sites_face_each_other(source, target);
        }

        #[test]
        fn swapping_ends_swaps_sites(source in bounds_strategy(), target in bounds_strategy()) {
            check_swapping_ends_swaps_sites(source, target);
        }

        #[test]
        fn geometry_envelops_endpoints(source in bounds_strategy(), target in bounds_strategy()) {
            check_geometry_envelops_endpoints(source, target);
        }

        #[test]
        fn aligned_orthogonal_becomes_straight(
            width in 80.0f32..200.0,
            tolerance in 1.0f32..20.0,
            ratio in -0.95f32..0.95,
        ) {
            check_aligned_orthogonal_becomes_straight(width, tolerance, ratio);
        }

        #[test]
        fn misaligned_orthogonal_is_kept(
            width in 80.0f32..200.0,
            tolerance in 1.0f32..20.0,
            ratio in prop_oneof![-3.0f32..-1.05, 1.05f32..3.0],
        ) {
            check_misaligned_orthogonal_is_kept(width, tolerance, ratio);
        }

        #[test]
        fn side_by_side_tolerance(dy in -50.0f32..50.0, tolerance in 0.0f32..30.0) {
            check_side_by_side_tolerance(dy, tolerance);
        }
    }
}
