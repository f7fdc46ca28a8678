//! The annotation state machine.
//!
//! A [`Controller`] owns the committed scene, the undo log and the grid, and
//! advances a [`GestureState`] in response to [`InputEvent`]s. It knows
//! nothing about windows or painting, so every behavior can be driven from a
//! test without a display.

use std::path::{Path, PathBuf};

use egui::{Color32, Key, Modifiers, Pos2, Rect};
use image::RgbaImage;

use crate::capture::{PlaceholderCapture, ScreenCapture};
use crate::command::{Action, UndoLog};
use crate::config::OverlayConfig;
use crate::document::Document;
use crate::element::{CapturedRegion, Shape, TextAnnotation};
use crate::error::ExportError;
use crate::geometry::{ShapePath, build_path};
use crate::grid::Grid;
use crate::input::{InputEvent, Request, shortcut_for};
use crate::state::GestureState;
use crate::tool::Tool;
use crate::{export, raster};

/// A cut selection must be wider and taller than this to be captured
pub const MIN_CAPTURE_EXTENT: f32 = 10.0;
pub const ZOOM_STEP: f32 = 1.2;
pub const ZOOM_RANGE: (f32, f32) = (0.25, 4.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A short message for the user, drained and displayed by the chrome
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct Controller {
    /// START / STOP state; pointer and key input only count while drawing
    drawing_active: bool,
    document: Document,
    history: UndoLog,
    grid: Grid,
    active_tool: Option<Tool>,
    gesture: GestureState,
    stroke_color: Color32,
    fill_color: Color32,
    stroke_width: f32,
    font_size: f32,
    zoom: f32,
    canvas: Rect,
    export_dir: Option<PathBuf>,
    export_background: Option<Color32>,
    capture: Box<dyn ScreenCapture>,
    notices: Vec<Notice>,
}

impl Controller {
    /// Controller with the placeholder capture backend
    pub fn new(config: OverlayConfig, canvas: Rect) -> Self {
        Self::with_capture(config, canvas, Box::new(PlaceholderCapture))
    }

    pub fn with_capture(
        config: OverlayConfig,
        canvas: Rect,
        capture: Box<dyn ScreenCapture>,
    ) -> Self {
        Self {
            drawing_active: false,
            document: Document::new(),
            history: UndoLog::new(),
            grid: Grid::new(config.grid, canvas),
            active_tool: Some(Tool::default()),
            gesture: GestureState::Idle,
            stroke_color: config.stroke_color,
            fill_color: config.fill_color,
            stroke_width: OverlayConfig::clamp_stroke_width(config.stroke_width),
            font_size: config.font_size,
            zoom: 1.0,
            canvas,
            export_dir: config.export_dir,
            export_background: config.export_background,
            capture,
            notices: Vec::new(),
        }
    }

    /// Snapshot of the settings worth persisting
    pub fn config(&self) -> OverlayConfig {
        OverlayConfig {
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            stroke_width: self.stroke_width,
            font_size: self.font_size,
            grid: self.grid.config(),
            export_dir: self.export_dir.clone(),
            export_background: self.export_background,
        }
    }

    // --- read-only state for the chrome -------------------------------------

    pub fn is_drawing_active(&self) -> bool {
        self.drawing_active
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.active_tool
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn fill_color(&self) -> Color32 {
        self.fill_color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn selected_region(&self) -> Option<&CapturedRegion> {
        self.document.selected_region()
    }

    /// In-progress cut rectangle, if a selection is being dragged out
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.gesture {
            GestureState::SelectingRegion { start, current } => {
                Some(Rect::from_two_pos(start, current))
            }
            _ => None,
        }
    }

    /// Transient path being drawn, not yet committed
    pub fn preview(&self) -> Option<&ShapePath> {
        self.gesture.preview()
    }

    /// Notices produced since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- event entry point ---------------------------------------------------

    /// Advance the state machine by one event
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Request> {
        if !self.drawing_active
            && matches!(
                event,
                InputEvent::PointerDown(_)
                    | InputEvent::PointerDragged(_)
                    | InputEvent::PointerUp(_)
                    | InputEvent::KeyPressed { .. }
            )
        {
            return None;
        }

        match event {
            InputEvent::ToggleDrawingMode => self.toggle_drawing_mode(),
            InputEvent::ToolSelected(tool) => self.select_tool(tool),
            InputEvent::PointerDown(pos) => return self.pointer_down(pos),
            InputEvent::PointerDragged(pos) => self.pointer_dragged(pos),
            InputEvent::PointerUp(pos) => self.pointer_up(pos),
            InputEvent::KeyPressed { key, modifiers } => return self.key_pressed(key, modifiers),
            InputEvent::Undo => {
                self.undo();
            }
            InputEvent::Redo => {
                self.redo();
            }
            InputEvent::ToggleGrid => {
                self.grid.toggle();
            }
            InputEvent::ToggleSnap => {
                self.grid.toggle_snap();
            }
            InputEvent::Cancel => self.cancel(),
            InputEvent::DeleteSelection => self.delete_selected_region(),
            InputEvent::TextSubmitted(content) => self.place_text(content),
            InputEvent::TextCancelled => {
                if matches!(self.gesture, GestureState::PlacingText { .. }) {
                    log::debug!("Text placement cancelled");
                    self.gesture = GestureState::Idle;
                }
            }
            InputEvent::SetStrokeColor(color) => self.stroke_color = color,
            InputEvent::SetFillColor(color) => self.fill_color = color,
            InputEvent::SetStrokeWidth(width) => {
                self.stroke_width = OverlayConfig::clamp_stroke_width(width);
            }
            InputEvent::ResetColors => self.stroke_color = Color32::BLACK,
            InputEvent::ZoomIn => self.zoom = (self.zoom * ZOOM_STEP).min(ZOOM_RANGE.1),
            InputEvent::ZoomOut => self.zoom = (self.zoom / ZOOM_STEP).max(ZOOM_RANGE.0),
            InputEvent::CanvasResized(rect) => {
                self.canvas = rect;
                self.grid.set_bounds(rect);
            }
            InputEvent::WindowMoved(origin) => self.capture.set_screen_origin(origin),
        }
        None
    }

    /// Undo the most recent action; a no-op on an empty log
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.document)
    }

    /// Redo the most recently undone action; a no-op when nothing was undone
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.document)
    }

    // --- tools ---------------------------------------------------------------

    fn toggle_drawing_mode(&mut self) {
        self.drawing_active = !self.drawing_active;
        if self.drawing_active {
            log::info!("Drawing mode started");
            self.notify(
                NoticeKind::Info,
                "Drawing Mode",
                "Drawing overlay active. Press STOP to click through.",
            );
        } else {
            // A half-finished gesture cannot be completed once input stops
            log::info!("Drawing mode stopped, dropping {} gesture", self.gesture.name());
            self.gesture = GestureState::Idle;
        }
    }

    fn select_tool(&mut self, tool: Tool) {
        self.gesture = GestureState::Idle;
        if self.active_tool == Some(tool) {
            log::info!("Tool deselected: {tool}");
            self.active_tool = None;
            self.notify(
                NoticeKind::Info,
                "Tool Deselected",
                "Click on a tool to select it again",
            );
            return;
        }

        log::info!("Tool selected: {tool}");
        self.active_tool = Some(tool);
        self.notify(NoticeKind::Info, "Tool Active", format!("{tool} tool ready"));
    }

    fn cancel(&mut self) {
        log::info!("Cancelled {} gesture", self.gesture.name());
        self.gesture = GestureState::Idle;
        self.active_tool = Some(Tool::default());
        self.notify(
            NoticeKind::Info,
            "Tool Cancelled",
            "Press ESC anytime to cancel current tool",
        );
    }

    fn key_pressed(&mut self, key: Key, modifiers: Modifiers) -> Option<Request> {
        // While the text prompt is open keystrokes belong to it, except Escape
        if matches!(self.gesture, GestureState::PlacingText { .. }) && key != Key::Escape {
            return None;
        }
        if modifiers.command && key == Key::S {
            return Some(Request::Export);
        }
        let event = shortcut_for(key, modifiers)?;
        self.handle_event(event)
    }

    // --- pointer gestures ----------------------------------------------------

    fn pointer_down(&mut self, location: Pos2) -> Option<Request> {
        if !self.gesture.is_idle() {
            log::debug!("Pointer down ignored while {}", self.gesture.name());
            return None;
        }
        let Some(tool) = self.active_tool else {
            log::debug!("Pointer down ignored: no active tool");
            return None;
        };
        // Hit testing uses the raw location; only the drop position snaps
        if tool.is_two_point_shape() {
            if let Some(region) = self.document.region_at(location) {
                // Keep the grab point under the pointer: later drags place the
                // region's corner at `pointer - offset`
                let origin = self.document.region(region).map_or(location, |r| r.position());
                self.document.select_region(Some(region));
                self.gesture = GestureState::DraggingRegion {
                    region,
                    offset: location - origin,
                };
                log::debug!("Dragging region {region}");
                return None;
            }
        }

        let snapped = self.grid.snap(location);
        match tool {
            Tool::Cut => {
                self.gesture = GestureState::SelectingRegion {
                    start: snapped,
                    current: snapped,
                };
            }
            Tool::Pen => {
                self.gesture = GestureState::DrawingFreehand {
                    path: ShapePath::Freehand(vec![snapped]),
                };
            }
            Tool::Text => {
                self.gesture = GestureState::PlacingText { at: snapped };
                log::debug!("Prompting for text at {snapped:?}");
                return Some(Request::PromptText { at: snapped });
            }
            Tool::Rectangle | Tool::Ellipse | Tool::Line | Tool::Arrow => {
                self.document.select_region(None);
                self.gesture = GestureState::DrawingShape {
                    tool,
                    start: snapped,
                    preview: None,
                };
            }
        }
        log::debug!("{tool} gesture began: {}", self.gesture.name());
        None
    }

    fn pointer_dragged(&mut self, location: Pos2) {
        let snapped = self.grid.snap(location);
        match &mut self.gesture {
            GestureState::SelectingRegion { current, .. } => *current = snapped,
            GestureState::DrawingFreehand { path } => path.push_point(snapped),
            GestureState::DrawingShape {
                tool,
                start,
                preview,
            } => *preview = build_path(*tool, *start, snapped),
            GestureState::DraggingRegion { region, offset } => {
                // Region moves are not recorded in the undo log. The corner
                // snaps, not the pointer, so regions line up with the grid
                let position = self.grid.snap(location - *offset);
                if let Some(region) = self.document.region_mut(*region) {
                    region.set_position(position);
                }
            }
            GestureState::Idle | GestureState::PlacingText { .. } => {}
        }
    }

    fn pointer_up(&mut self, location: Pos2) {
        let snapped = self.grid.snap(location);
        // Every gesture ends here; only a pending text prompt is put back
        match std::mem::take(&mut self.gesture) {
            GestureState::SelectingRegion { start, .. } => {
                self.capture_region(Rect::from_two_pos(start, snapped));
            }
            GestureState::DrawingFreehand { path } => self.commit_shape(Tool::Pen, path),
            GestureState::DrawingShape { tool, start, .. } => {
                let Some(path) = build_path(tool, start, snapped) else {
                    return;
                };
                let bounds = path.bounds();
                self.commit_shape(tool, path);
                // Drawing a rectangle also proposes its short side as the grid cell size
                if tool == Tool::Rectangle {
                    self.grid
                        .update_cell_size_from_rectangle(bounds.width(), bounds.height());
                }
            }
            GestureState::DraggingRegion { region, .. } => {
                log::debug!("Finished dragging region {region}");
            }
            pending @ GestureState::PlacingText { .. } => self.gesture = pending,
            GestureState::Idle => {}
        }
    }

    // --- commits -------------------------------------------------------------

    fn commit_shape(&mut self, tool: Tool, path: ShapePath) {
        let shape = Shape::new(tool, path, self.stroke_color, self.stroke_width);
        self.history
            .execute(Action::AddShape(shape), &mut self.document);
    }

    fn capture_region(&mut self, area: Rect) {
        // Strict: an extent of exactly the threshold counts as a stray click
        if area.width() <= MIN_CAPTURE_EXTENT || area.height() <= MIN_CAPTURE_EXTENT {
            log::debug!(
                "Discarding {}x{} selection below capture threshold",
                area.width(),
                area.height()
            );
            return;
        }

        let pixels = match self.capture.capture(area) {
            Ok(pixels) => pixels,
            Err(err) => {
                log::warn!("Screen capture failed: {err}");
                return;
            }
        };
        let region = CapturedRegion::new(pixels, area.min, area.size());
        let id = region.id();
        self.history
            .execute(Action::AddRegion(region), &mut self.document);
        self.document.select_region(Some(id));
    }

    fn place_text(&mut self, content: String) {
        let GestureState::PlacingText { at } = self.gesture else {
            log::warn!("Text submitted with no pending placement");
            return;
        };
        self.gesture = GestureState::Idle;
        if content.trim().is_empty() {
            log::debug!("Ignoring empty text");
            return;
        }
        let text = TextAnnotation::new(content, at, self.font_size, self.stroke_color);
        self.history.execute(Action::AddText(text), &mut self.document);
    }

    fn delete_selected_region(&mut self) {
        let Some(region) = self.document.selected_region().cloned() else {
            return;
        };
        if matches!(self.gesture, GestureState::DraggingRegion { region: id, .. } if id == region.id())
        {
            self.gesture = GestureState::Idle;
        }
        self.history
            .execute(Action::DeleteRegion { region, index: 0 }, &mut self.document);
    }

    // --- export --------------------------------------------------------------

    /// Flatten the committed scene into a canvas-sized bitmap
    pub fn render_bitmap(&self) -> RgbaImage {
        raster::rasterize(&self.document, self.canvas, self.export_background)
    }

    /// Write the canvas to `path` as PNG. Failures are reported as a notice
    /// and leave the scene untouched.
    pub fn export_png(&mut self, path: &Path) -> Result<(), ExportError> {
        let bitmap = self.render_bitmap();
        match export::save_png(&bitmap, path) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                self.notify(NoticeKind::Success, "Drawing Saved", format!("Saved to {name}"));
                Ok(())
            }
            Err(err) => {
                log::error!("Export failed: {err}");
                self.notify(NoticeKind::Error, "Export Failed", err.to_string());
                Err(err)
            }
        }
    }

    /// Export to `Drawing_<timestamp>.png` in the configured or default directory
    pub fn export_to_default_path(&mut self) -> Result<PathBuf, ExportError> {
        let path = export::default_export_path(self.export_dir.as_deref());
        self.export_png(&path)?;
        Ok(path)
    }

    fn notify(&mut self, kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) {
        self.notices.push(Notice::new(kind, title, message));
    }
}
