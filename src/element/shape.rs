use egui::Color32;

use crate::geometry::ShapePath;
use crate::id_generator::{ElementId, generate_id};
use crate::tool::Tool;

/// Stroke parameters captured when a shape is committed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub round_caps: bool,
}

/// A committed vector shape. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ElementId,
    tool: Tool,
    path: ShapePath,
    style: StrokeStyle,
}

impl Shape {
    pub fn new(tool: Tool, path: ShapePath, color: Color32, width: f32) -> Self {
        Self {
            id: generate_id(),
            tool,
            path,
            style: StrokeStyle {
                color,
                width,
                round_caps: tool.uses_round_caps(),
            },
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Tool that drew this shape
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn path(&self) -> &ShapePath {
        &self.path
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}
