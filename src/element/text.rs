use egui::{Color32, Pos2};

use crate::id_generator::{ElementId, generate_id};

pub const DEFAULT_FONT_SIZE: f32 = 18.0;

/// A placed string. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    id: ElementId,
    content: String,
    position: Pos2,
    font_size: f32,
    color: Color32,
}

impl TextAnnotation {
    pub fn new(content: impl Into<String>, position: Pos2, font_size: f32, color: Color32) -> Self {
        Self {
            id: generate_id(),
            content: content.into(),
            position,
            font_size,
            color,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}
