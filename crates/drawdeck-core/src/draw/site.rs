use serde::Serialize;

use crate::geometry::{Bounds, Point};

/// A connection site on a shape's bounding box.
///
/// Each site is the midpoint of one bounding-box edge. The discriminant is the
/// connection-site index used by slide formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DockingSite {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl DockingSite {
    /// All sites in index order.
    pub const ALL: [DockingSite; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The connection-site index.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Whether the site lies on a horizontal edge, so a connector leaves it vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Whether the site lies on a vertical edge, so a connector leaves it horizontally.
    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }

    /// The absolute point of this site on `bounds`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use drawdeck_core::{draw::DockingSite, geometry::{Bounds, Point, Size}};
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
    /// assert_eq!(DockingSite::Top.point_on(bounds), Point::new(50.0, 0.0));
    /// assert_eq!(DockingSite::Right.point_on(bounds), Point::new(100.0, 25.0));
    /// ```
    pub fn point_on(self, bounds: Bounds) -> Point {
        let center = bounds.center();
        match self {
            Self::Top => Point::new(center.x(), bounds.min_y()),
            Self::Right => Point::new(bounds.max_x(), center.y()),
            Self::Bottom => Point::new(center.x(), bounds.max_y()),
            Self::Left => Point::new(bounds.min_x(), center.y()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn test_indices() {
        let indices: Vec<_> = DockingSite::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_orientation() {
        assert!(DockingSite::Top.is_vertical());
        assert!(DockingSite::Bottom.is_vertical());
        assert!(DockingSite::Left.is_horizontal());
        assert!(DockingSite::Right.is_horizontal());
    }

    #[test]
    fn test_point_on() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 60.0));
        assert_eq!(DockingSite::Top.point_on(bounds), Point::new(60.0, 20.0));
        assert_eq!(DockingSite::Right.point_on(bounds), Point::new(110.0, 50.0));
        assert_eq!(DockingSite::Bottom.point_on(bounds), Point::new(60.0, 80.0));
        assert_eq!(DockingSite::Left.point_on(bounds), Point::new(10.0, 50.0));
    }
}
