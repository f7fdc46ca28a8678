mod region;
mod shape;
mod text;

pub use region::CapturedRegion;
pub use shape::{Shape, StrokeStyle};
pub use text::{DEFAULT_FONT_SIZE, TextAnnotation};

use crate::id_generator::ElementId;

/// Everything that can be committed onto the canvas
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Shape(Shape),
    Region(CapturedRegion),
    Text(TextAnnotation),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Shape(s) => s.id(),
            Element::Region(r) => r.id(),
            Element::Text(t) => t.id(),
        }
    }

    pub fn element_type(&self) -> &'static str {
        match self {
            Element::Shape(_) => "shape",
            Element::Region(_) => "region",
            Element::Text(_) => "text",
        }
    }

    pub fn as_region(&self) -> Option<&CapturedRegion> {
        match self {
            Element::Region(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_region_mut(&mut self) -> Option<&mut CapturedRegion> {
        match self {
            Element::Region(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Element::Shape(shape)
    }
}

impl From<CapturedRegion> for Element {
    fn from(region: CapturedRegion) -> Self {
        Element::Region(region)
    }
}

impl From<TextAnnotation> for Element {
    fn from(text: TextAnnotation) -> Self {
        Element::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build_path;
    use crate::tool::Tool;
    use egui::{Color32, pos2, vec2};
    use image::RgbaImage;

    #[test]
    fn test_shape_converts_into_element() {
        let path = build_path(Tool::Rectangle, pos2(10.0, 10.0), pos2(50.0, 40.0)).unwrap();
        let shape = Shape::new(Tool::Rectangle, path, Color32::BLACK, 4.0);
        let id = shape.id();
        let element: Element = shape.into();
        assert_eq!(element.element_type(), "shape");
        assert_eq!(element.id(), id);
    }

    #[test]
    fn test_region_accessors_only_match_regions() {
        let region = CapturedRegion::new(RgbaImage::new(2, 2), pos2(5.0, 5.0), vec2(20.0, 10.0));
        let mut element: Element = region.into();
        assert_eq!(element.element_type(), "region");
        let region = element.as_region_mut().unwrap();
        region.set_position(pos2(7.0, 7.0));
        assert_eq!(element.as_region().map(CapturedRegion::position), Some(pos2(7.0, 7.0)));

        let text: Element = TextAnnotation::new("hi", pos2(0.0, 0.0), 18.0, Color32::BLACK).into();
        assert_eq!(text.element_type(), "text");
        assert!(text.as_region().is_none());
    }
}
