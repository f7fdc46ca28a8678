//! Pure geometry: converting a tool gesture into a renderable path.

mod path;

pub use path::{
    ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH, ELLIPSE_SEGMENTS, ShapePath, SubPath, build_path,
};

use egui::{Pos2, Rect};

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2]) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}
