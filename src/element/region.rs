use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};
use image::RgbaImage;

use crate::id_generator::{ElementId, generate_id};

/// Screen pixels captured under a cut selection, placed back on the canvas
/// as a draggable image
#[derive(Clone)]
pub struct CapturedRegion {
    id: ElementId,
    image: Arc<RgbaImage>,
    position: Pos2,
    size: Vec2,
    selected: bool,
}

// Custom Debug implementation to avoid dumping the pixel buffer
impl std::fmt::Debug for CapturedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedRegion")
            .field("id", &self.id)
            .field("pixels", &self.image.dimensions())
            .field("position", &self.position)
            .field("size", &self.size)
            .field("selected", &self.selected)
            .finish()
    }
}

impl PartialEq for CapturedRegion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && Arc::ptr_eq(&self.image, &other.image)
            && self.position == other.position
            && self.size == other.size
            && self.selected == other.selected
    }
}

impl CapturedRegion {
    pub fn new(image: RgbaImage, position: Pos2, size: Vec2) -> Self {
        Self {
            id: generate_id(),
            image: Arc::new(image),
            position,
            size,
            selected: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
