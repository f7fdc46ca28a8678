use egui::{Pos2, Rect, pos2};

use super::calculate_bounds;
use crate::tool::Tool;

/// Length of each arrowhead barb, in canvas units
pub const ARROW_HEAD_LENGTH: f32 = 15.0;
/// Half-angle between the shaft and each barb, in radians
pub const ARROW_HEAD_ANGLE: f32 = 0.5;
/// Number of straight segments used when flattening an ellipse
pub const ELLIPSE_SEGMENTS: usize = 64;

/// Vector path produced by a drawing gesture
#[derive(Debug, Clone, PartialEq)]
pub enum ShapePath {
    /// Axis-aligned rectangle outline
    Rect(Rect),
    /// Ellipse inscribed in the bounding box
    Ellipse(Rect),
    /// Single segment
    Line { start: Pos2, end: Pos2 },
    /// Shaft plus two barbs anchored at `end`
    Arrow {
        start: Pos2,
        end: Pos2,
        head: [Pos2; 2],
    },
    /// Every point the pointer visited, in order
    Freehand(Vec<Pos2>),
}

/// One continuous run of points, ready to stroke
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub points: Vec<Pos2>,
    pub closed: bool,
}

impl SubPath {
    fn open(points: Vec<Pos2>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    fn closed(points: Vec<Pos2>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// Consecutive point pairs, including the closing segment when closed
    pub fn segments(&self) -> impl Iterator<Item = (Pos2, Pos2)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) if self.points.len() > 2 => Some((*last, *first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }
}

/// Builds the path a tool produces for a gesture from `start` to `end`.
///
/// Text and cut do not draw, so they yield `None`. For the pen this is the
/// degenerate two-point stroke; the controller extends freehand paths with
/// every drag point instead.
pub fn build_path(tool: Tool, start: Pos2, end: Pos2) -> Option<ShapePath> {
    match tool {
        Tool::Rectangle => Some(ShapePath::Rect(Rect::from_two_pos(start, end))),
        Tool::Ellipse => Some(ShapePath::Ellipse(Rect::from_two_pos(start, end))),
        Tool::Line => Some(ShapePath::Line { start, end }),
        Tool::Arrow => Some(ShapePath::Arrow {
            start,
            end,
            head: arrow_head(start, end),
        }),
        Tool::Pen => Some(ShapePath::Freehand(vec![start, end])),
        Tool::Text | Tool::Cut => None,
    }
}

fn arrow_head(start: Pos2, end: Pos2) -> [Pos2; 2] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let barb = |offset: f32| {
        pos2(
            end.x - ARROW_HEAD_LENGTH * (angle + offset).cos(),
            end.y - ARROW_HEAD_LENGTH * (angle + offset).sin(),
        )
    };
    [barb(-ARROW_HEAD_ANGLE), barb(ARROW_HEAD_ANGLE)]
}

impl ShapePath {
    /// Append a pointer sample to a freehand path; other paths are fixed
    pub fn push_point(&mut self, point: Pos2) {
        if let ShapePath::Freehand(points) = self {
            points.push(point);
        }
    }

    /// Tight bounding box of the geometry, ignoring stroke width
    pub fn bounds(&self) -> Rect {
        match self {
            ShapePath::Rect(rect) | ShapePath::Ellipse(rect) => *rect,
            ShapePath::Line { start, end } => Rect::from_two_pos(*start, *end),
            ShapePath::Arrow { start, end, head } => {
                calculate_bounds(&[*start, *end, head[0], head[1]])
            }
            ShapePath::Freehand(points) => calculate_bounds(points),
        }
    }

    /// Flatten into strokeable runs of points
    pub fn sub_paths(&self) -> Vec<SubPath> {
        match self {
            ShapePath::Rect(rect) => vec![SubPath::closed(vec![
                rect.left_top(),
                rect.right_top(),
                rect.right_bottom(),
                rect.left_bottom(),
            ])],
            ShapePath::Ellipse(rect) => {
                let center = rect.center();
                let radius = rect.size() / 2.0;
                let points = (0..ELLIPSE_SEGMENTS)
                    .map(|i| {
                        let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                        pos2(center.x + radius.x * t.cos(), center.y + radius.y * t.sin())
                    })
                    .collect();
                vec![SubPath::closed(points)]
            }
            ShapePath::Line { start, end } => vec![SubPath::open(vec![*start, *end])],
            ShapePath::Arrow { start, end, head } => vec![
                SubPath::open(vec![*start, *end]),
                SubPath::open(vec![*end, head[0]]),
                SubPath::open(vec![*end, head[1]]),
            ],
            ShapePath::Freehand(points) => vec![SubPath::open(points.clone())],
        }
    }
}
