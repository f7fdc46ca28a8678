use egui::{Pos2, Vec2};

use crate::geometry::ShapePath;
use crate::id_generator::ElementId;
use crate::tool::Tool;

/// Where the controller is within a pointer gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Cut tool: rubber-band selection from `start`
    SelectingRegion { start: Pos2, current: Pos2 },
    /// Pen tool: points collected so far
    DrawingFreehand { path: ShapePath },
    /// Two-point shape tool with the latest preview
    DrawingShape {
        tool: Tool,
        start: Pos2,
        preview: Option<ShapePath>,
    },
    /// Waiting for the chrome to answer a text prompt
    PlacingText { at: Pos2 },
    /// Moving a captured region; `offset` is pointer minus region origin
    DraggingRegion { region: ElementId, offset: Vec2 },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::SelectingRegion { .. } => "SelectingRegion",
            Self::DrawingFreehand { .. } => "DrawingFreehand",
            Self::DrawingShape { .. } => "DrawingShape",
            Self::PlacingText { .. } => "PlacingText",
            Self::DraggingRegion { .. } => "DraggingRegion",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Transient path to draw on top of the committed scene
    pub fn preview(&self) -> Option<&ShapePath> {
        match self {
            Self::DrawingFreehand { path } => Some(path),
            Self::DrawingShape { preview, .. } => preview.as_ref(),
            _ => None,
        }
    }
}
