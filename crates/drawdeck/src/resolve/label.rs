//! Edge label placement.
//!
//! A label is anchored along the line between the centers of the connected
//! shapes and gets an approximate text box centered on that anchor.

use drawdeck_core::{
    geometry::{Bounds, Point, Size},
    text::StyledRun,
};
use drawdeck_parser::Geometry;

use crate::{config::LabelConfig, deck::LabelSpec};

/// Average glyph width relative to the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;
/// Line height relative to the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;
const HORIZONTAL_PADDING: f32 = 8.0;
const VERTICAL_PADDING: f32 = 4.0;

/// The anchor point of a label.
///
/// Relative geometry places the label at `(x + 1) / 2` of the way from the
/// source to the target center, then `y` pixels off the line to its left.
/// Without relative geometry the label sits at the midpoint. A non-zero offset
/// is added last.
pub fn anchor(geometry: Option<&Geometry>, source: Point, target: Point) -> Point {
    let Some(geometry) = geometry else {
        return source.midpoint(target);
    };

    let base = if geometry.relative() {
        let t = ((geometry.x() + 1.0) / 2.0).clamp(0.0, 1.0);
        let along = source.lerp(target, t);

        let direction = target.sub_point(source);
        let length = direction.hypot();
        if length > 0.0 {
            let normal = direction.scale(1.0 / length).perpendicular();
            along.add_point(normal.scale(geometry.y()))
        } else {
            along
        }
    } else {
        source.midpoint(target)
    };

    match geometry.offset() {
        Some(offset) if !offset.is_zero() => base.add_point(offset),
        _ => base,
    }
}

/// Approximate size of the text in `runs`.
///
/// Lines are split at line-break runs and at newlines inside run text. The
/// largest run size is used for every line.
pub fn text_size(runs: &[StyledRun], default_size: f32, config: &LabelConfig) -> Size {
    let text: String = runs.iter().map(StyledRun::text).collect();
    let lines: Vec<usize> = text.split('\n').map(|line| line.chars().count()).collect();
    let longest = lines.iter().copied().max().unwrap_or(0) as f32;
    let line_count = lines.len().max(1) as f32;

    let size = runs
        .iter()
        .filter_map(|run| run.format().size())
        .reduce(f32::max)
        .unwrap_or(default_size);

    let width = longest.mul_add(size * CHAR_WIDTH_FACTOR, HORIZONTAL_PADDING);
    let height = line_count.mul_add(size * LINE_HEIGHT_FACTOR, VERTICAL_PADDING);

    Size::new(width, height).max(Size::new(config.min_width(), config.min_height()))
}

/// Places a label with the given runs.
pub fn place(
    geometry: Option<&Geometry>,
    source: Point,
    target: Point,
    runs: Vec<StyledRun>,
    default_size: f32,
    config: &LabelConfig,
) -> LabelSpec {
    let anchor = anchor(geometry, source, target);
    let bounds = Bounds::new_from_center(anchor, text_size(&runs, default_size, config));

    LabelSpec {
        anchor,
        bounds,
        runs,
    }
}
