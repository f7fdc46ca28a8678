// src/renderer.rs
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use crate::controller::Controller;
use crate::element::{CapturedRegion, Element, StrokeStyle, TextAnnotation};
use crate::geometry::ShapePath;
use crate::grid::GridVisuals;
use crate::texture_manager::TextureManager;

const SELECTION_COLOR: Color32 = Color32::from_rgb(0, 122, 255);
const GRID_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);
const GRID_POINT_COLOR: Color32 = Color32::from_rgba_premultiplied(90, 90, 90, 120);
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

/// Paints the controller's scene onto an egui painter each frame
#[derive(Default)]
pub struct Renderer {
    textures: TextureManager,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the current frame
    ///
    /// Args:
    ///     painter (egui::Painter): The painter for the canvas area
    ///     controller (Controller): Source of the committed scene and transient gesture state
    pub fn render(&mut self, painter: &Painter, controller: &Controller) {
        self.textures.begin_frame();

        if let Some(visuals) = controller.grid().visuals() {
            paint_grid(painter, visuals);
        }

        for element in controller.document().elements() {
            match element {
                Element::Region(region) => self.paint_region(painter, region),
                Element::Shape(shape) => paint_path(painter, shape.path(), &shape.style()),
                Element::Text(text) => paint_text(painter, text),
            }
        }

        if let Some(path) = controller.preview() {
            let style = StrokeStyle {
                color: controller.stroke_color(),
                width: controller.stroke_width(),
                round_caps: controller.active_tool().is_some_and(|t| t.uses_round_caps()),
            };
            paint_path(painter, path, &style);
        }

        if let Some(rect) = controller.selection_rect() {
            painter.rect_filled(rect, 0.0, SELECTION_COLOR.gamma_multiply(0.1));
            paint_dashed_rect(painter, rect, Stroke::new(1.5, SELECTION_COLOR));
        }
    }

    fn paint_region(&mut self, painter: &Painter, region: &CapturedRegion) {
        let texture = self.textures.texture_for(painter.ctx(), region);
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(texture, region.rect(), uv, Color32::WHITE);
        if region.is_selected() {
            paint_dashed_rect(painter, region.rect(), Stroke::new(2.0, SELECTION_COLOR));
        }
    }
}

fn paint_grid(painter: &Painter, visuals: &GridVisuals) {
    let stroke = Stroke::new(0.5, GRID_LINE_COLOR);
    for [a, b] in &visuals.lines {
        painter.line_segment([*a, *b], stroke);
    }
    for point in &visuals.points {
        painter.circle_filled(*point, 1.5, GRID_POINT_COLOR);
    }
}

fn paint_path(painter: &Painter, path: &ShapePath, style: &StrokeStyle) {
    let stroke = Stroke::new(style.width, style.color);
    for sub_path in path.sub_paths() {
        match sub_path.points.as_slice() {
            [] => {}
            [point] => {
                painter.circle_filled(*point, style.width / 2.0, style.color);
            }
            points => {
                if sub_path.closed {
                    painter.add(egui::Shape::closed_line(points.to_vec(), stroke));
                } else {
                    painter.add(egui::Shape::line(points.to_vec(), stroke));
                    if style.round_caps {
                        for cap in [points[0], points[points.len() - 1]] {
                            painter.circle_filled(cap, style.width / 2.0, style.color);
                        }
                    }
                }
            }
        }
    }
}

fn paint_text(painter: &Painter, text: &TextAnnotation) {
    painter.text(
        text.position(),
        Align2::LEFT_TOP,
        text.content(),
        FontId::proportional(text.font_size()),
        text.color(),
    );
}

fn paint_dashed_rect(painter: &Painter, rect: Rect, stroke: Stroke) {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &corners,
        stroke,
        DASH_LENGTH,
        GAP_LENGTH,
    ));
}
