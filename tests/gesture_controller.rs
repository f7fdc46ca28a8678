use click_draw::{
    CaptureError, Controller, GestureState, InputEvent, NoticeKind, OverlayConfig, Request,
    ScreenCapture, Tool,
};
use egui::{Key, Modifiers, Pos2, Rect, Vec2, pos2};
use image::RgbaImage;

fn canvas() -> Rect {
    Rect::from_min_max(Pos2::ZERO, pos2(800.0, 600.0))
}

/// Controller with drawing mode started and its notice drained
fn started(mut controller: Controller) -> Controller {
    controller.handle_event(InputEvent::ToggleDrawingMode);
    controller.take_notices();
    controller
}

fn controller() -> Controller {
    started(Controller::new(OverlayConfig::default(), canvas()))
}

fn drag(controller: &mut Controller, from: Pos2, to: Pos2) {
    controller.handle_event(InputEvent::PointerDown(from));
    controller.handle_event(InputEvent::PointerDragged(to));
    controller.handle_event(InputEvent::PointerUp(to));
}

fn key(controller: &mut Controller, key: Key, modifiers: Modifiers) -> Option<Request> {
    controller.handle_event(InputEvent::KeyPressed { key, modifiers })
}

struct FailingCapture;

impl ScreenCapture for FailingCapture {
    fn capture(&mut self, _area: Rect) -> Result<RgbaImage, CaptureError> {
        Err(CaptureError::Backend("no display".to_owned()))
    }
}

#[test]
fn test_rectangle_commits_shape_and_sets_grid_cell() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToggleGrid);
    drag(&mut controller, pos2(10.0, 10.0), pos2(50.0, 40.0));

    let shapes: Vec<_> = controller.document().shapes().collect();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].tool(), Tool::Rectangle);
    assert_eq!(
        shapes[0].path().bounds(),
        Rect::from_min_max(pos2(10.0, 10.0), pos2(50.0, 40.0))
    );
    assert_eq!(controller.grid().cell_size(), 30.0);
    assert_eq!(controller.grid().visuals().map(|v| v.cell_size), Some(30.0));
    assert!(controller.gesture().is_idle());
}

#[test]
fn test_small_cut_selection_is_discarded() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
    drag(&mut controller, pos2(0.0, 0.0), pos2(5.0, 5.0));

    assert_eq!(controller.document().regions().count(), 0);
    assert!(!controller.history().can_undo());
}

#[test]
fn test_cut_threshold_is_strict_on_both_axes() {
    let cut = |to: Pos2| {
        let mut controller = controller();
        controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
        drag(&mut controller, pos2(0.0, 0.0), to);
        controller.document().regions().count()
    };

    assert_eq!(cut(pos2(10.0, 10.0)), 0);
    assert_eq!(cut(pos2(11.0, 11.0)), 1);
    // One axis at the threshold is enough to discard
    assert_eq!(cut(pos2(10.0, 200.0)), 0);
    assert_eq!(cut(pos2(200.0, 10.0)), 0);
}

#[test]
fn test_stopped_overlay_ignores_pointer_and_keys() {
    let mut controller = Controller::new(OverlayConfig::default(), canvas());
    assert!(!controller.is_drawing_active());

    drag(&mut controller, pos2(10.0, 10.0), pos2(50.0, 40.0));
    assert_eq!(key(&mut controller, Key::S, Modifiers::COMMAND), None);
    key(&mut controller, Key::G, Modifiers::NONE);
    assert!(controller.document().is_empty());
    assert!(!controller.grid().is_shown());

    // Palette events still reach a stopped overlay
    controller.handle_event(InputEvent::ToggleGrid);
    assert!(controller.grid().is_shown());

    controller.handle_event(InputEvent::ToggleDrawingMode);
    assert!(controller.is_drawing_active());
    assert_eq!(controller.take_notices()[0].title, "Drawing Mode");
    drag(&mut controller, pos2(10.0, 10.0), pos2(50.0, 40.0));
    assert_eq!(controller.document().shapes().count(), 1);
}

#[test]
fn test_stopping_drops_gesture_in_progress() {
    let mut controller = controller();
    controller.handle_event(InputEvent::PointerDown(pos2(10.0, 10.0)));
    controller.handle_event(InputEvent::PointerDragged(pos2(80.0, 60.0)));
    assert!(controller.preview().is_some());

    controller.handle_event(InputEvent::ToggleDrawingMode);
    assert!(!controller.is_drawing_active());
    assert!(controller.gesture().is_idle());

    // The release lands after STOP and must not commit anything
    controller.handle_event(InputEvent::PointerUp(pos2(80.0, 60.0)));
    controller.handle_event(InputEvent::ToggleDrawingMode);
    assert!(controller.document().is_empty());
    assert!(!controller.history().can_undo());
}

#[test]
fn test_window_move_offsets_capture_area() {
    struct RecordingCapture(std::rc::Rc<std::cell::RefCell<Vec<Rect>>>, Pos2);

    impl ScreenCapture for RecordingCapture {
        fn capture(&mut self, area: Rect) -> Result<RgbaImage, CaptureError> {
            self.0.borrow_mut().push(area.translate(self.1.to_vec2()));
            Ok(RgbaImage::new(area.width() as u32, area.height() as u32))
        }

        fn set_screen_origin(&mut self, origin: Pos2) {
            self.1 = origin;
        }
    }

    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let backend = RecordingCapture(seen.clone(), Pos2::ZERO);
    let mut controller = started(Controller::with_capture(
        OverlayConfig::default(),
        canvas(),
        Box::new(backend),
    ));
    controller.handle_event(InputEvent::WindowMoved(pos2(1920.0, 0.0)));
    controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
    drag(&mut controller, pos2(100.0, 100.0), pos2(150.0, 130.0));

    assert_eq!(
        *seen.borrow(),
        vec![Rect::from_min_max(pos2(2020.0, 100.0), pos2(2070.0, 130.0))]
    );
    // The region itself stays in canvas coordinates
    assert_eq!(
        controller.selected_region().map(|r| r.position()),
        Some(pos2(100.0, 100.0))
    );
}

#[test]
fn test_cut_captures_and_selects_region() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
    controller.handle_event(InputEvent::PointerDown(pos2(100.0, 100.0)));
    controller.handle_event(InputEvent::PointerDragged(pos2(150.0, 130.0)));
    assert_eq!(
        controller.selection_rect(),
        Some(Rect::from_min_max(pos2(100.0, 100.0), pos2(150.0, 130.0)))
    );
    controller.handle_event(InputEvent::PointerUp(pos2(150.0, 130.0)));

    let region = controller.selected_region().expect("captured region is selected");
    assert_eq!(region.position(), pos2(100.0, 100.0));
    assert_eq!(region.size(), Vec2::new(50.0, 30.0));
    assert_eq!(region.image().dimensions(), (50, 30));
    assert!(controller.selection_rect().is_none());
}

#[test]
fn test_capture_failure_commits_nothing() {
    let mut controller = started(Controller::with_capture(
        OverlayConfig::default(),
        canvas(),
        Box::new(FailingCapture),
    ));
    controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
    drag(&mut controller, pos2(0.0, 0.0), pos2(100.0, 100.0));

    assert!(controller.document().is_empty());
    assert!(controller.gesture().is_idle());
}

#[test]
fn test_reselecting_active_tool_deselects_it() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Line));
    assert_eq!(controller.active_tool(), Some(Tool::Line));

    controller.handle_event(InputEvent::ToolSelected(Tool::Line));
    assert_eq!(controller.active_tool(), None);

    // Without a tool, pointer input is ignored
    drag(&mut controller, pos2(0.0, 0.0), pos2(50.0, 50.0));
    assert!(controller.document().is_empty());

    let notices = controller.take_notices();
    assert_eq!(notices[0].message, "Line tool ready");
    assert_eq!(notices[1].title, "Tool Deselected");
    assert!(controller.take_notices().is_empty());
}

#[test]
fn test_escape_discards_preview_and_resets_tool() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Arrow));
    controller.handle_event(InputEvent::PointerDown(pos2(10.0, 10.0)));
    controller.handle_event(InputEvent::PointerDragged(pos2(80.0, 40.0)));
    assert!(controller.preview().is_some());

    key(&mut controller, Key::Escape, Modifiers::NONE);

    assert!(controller.gesture().is_idle());
    assert!(controller.preview().is_none());
    assert_eq!(controller.active_tool(), Some(Tool::Rectangle));
    assert!(controller.document().is_empty());

    // The release after a cancel commits nothing
    controller.handle_event(InputEvent::PointerUp(pos2(80.0, 40.0)));
    assert!(controller.document().is_empty());
}

#[test]
fn test_dragging_region_moves_it_without_undo_entry() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
    drag(&mut controller, pos2(100.0, 100.0), pos2(200.0, 200.0));
    let undo_depth = controller.history().undo_stack().len();

    controller.handle_event(InputEvent::ToolSelected(Tool::Rectangle));
    controller.handle_event(InputEvent::PointerDown(pos2(120.0, 110.0)));
    assert!(matches!(
        controller.gesture(),
        GestureState::DraggingRegion { offset, .. } if *offset == Vec2::new(20.0, 10.0)
    ));
    controller.handle_event(InputEvent::PointerDragged(pos2(320.0, 310.0)));
    controller.handle_event(InputEvent::PointerUp(pos2(320.0, 310.0)));

    let region = controller.document().regions().next().unwrap();
    assert_eq!(region.position(), pos2(300.0, 300.0));
    assert_eq!(controller.history().undo_stack().len(), undo_depth);
    assert_eq!(controller.document().shapes().count(), 0);
}

#[test]
fn test_region_drag_snaps_to_grid() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
    drag(&mut controller, pos2(0.0, 0.0), pos2(100.0, 100.0));
    controller.handle_event(InputEvent::ToggleSnap);

    controller.handle_event(InputEvent::ToolSelected(Tool::Line));
    controller.handle_event(InputEvent::PointerDown(pos2(3.0, 3.0)));
    controller.handle_event(InputEvent::PointerDragged(pos2(50.0, 58.0)));

    let region = controller.document().regions().next().unwrap();
    assert_eq!(region.position(), pos2(40.0, 60.0));
}

#[test]
fn test_snapping_quantizes_drawn_points() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToggleSnap);
    controller.handle_event(InputEvent::ToolSelected(Tool::Line));
    drag(&mut controller, pos2(11.0, 9.0), pos2(52.0, 68.0));

    let shape = controller.document().shapes().next().unwrap();
    assert_eq!(
        shape.path().bounds(),
        Rect::from_min_max(pos2(20.0, 0.0), pos2(60.0, 60.0))
    );
}

#[test]
fn test_pen_collects_every_dragged_point() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Pen));
    controller.handle_event(InputEvent::PointerDown(pos2(0.0, 0.0)));
    for i in 1..=4 {
        controller.handle_event(InputEvent::PointerDragged(pos2(i as f32 * 10.0, 5.0)));
    }
    controller.handle_event(InputEvent::PointerUp(pos2(40.0, 5.0)));

    let shape = controller.document().shapes().next().unwrap();
    let sub_paths = shape.path().sub_paths();
    assert_eq!(sub_paths.len(), 1);
    assert_eq!(sub_paths[0].points.len(), 5);
    assert!(!sub_paths[0].closed);
    assert!(shape.style().round_caps);
}

#[test]
fn test_ellipse_does_not_change_grid_cell() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Ellipse));
    drag(&mut controller, pos2(10.0, 10.0), pos2(50.0, 40.0));

    assert_eq!(controller.document().shapes().count(), 1);
    assert_eq!(controller.grid().cell_size(), 20.0);
}

#[test]
fn test_text_placement_flow() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Text));

    let request = controller.handle_event(InputEvent::PointerDown(pos2(40.0, 60.0)));
    assert_eq!(request, Some(Request::PromptText { at: pos2(40.0, 60.0) }));
    assert!(matches!(controller.gesture(), GestureState::PlacingText { .. }));

    // Typing into the prompt must not trigger shortcuts
    key(&mut controller, Key::G, Modifiers::NONE);
    assert!(!controller.grid().is_shown());

    controller.handle_event(InputEvent::TextSubmitted("Hello".to_owned()));
    let text = controller.document().texts().next().unwrap();
    assert_eq!(text.content(), "Hello");
    assert_eq!(text.position(), pos2(40.0, 60.0));
    assert!(controller.gesture().is_idle());
    assert!(controller.history().can_undo());
}

#[test]
fn test_empty_or_cancelled_text_is_discarded() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Text));

    controller.handle_event(InputEvent::PointerDown(pos2(0.0, 0.0)));
    controller.handle_event(InputEvent::TextSubmitted("   ".to_owned()));
    controller.handle_event(InputEvent::PointerDown(pos2(0.0, 0.0)));
    controller.handle_event(InputEvent::TextCancelled);

    assert!(controller.document().is_empty());
    assert!(controller.gesture().is_idle());
}

#[test]
fn test_command_s_requests_export() {
    let mut controller = controller();
    assert_eq!(
        key(&mut controller, Key::S, Modifiers::COMMAND),
        Some(Request::Export)
    );
    assert!(!controller.grid().snap_enabled());

    assert_eq!(key(&mut controller, Key::S, Modifiers::NONE), None);
    assert!(controller.grid().snap_enabled());
}

#[test]
fn test_delete_key_removes_selected_region_undoably() {
    let mut controller = controller();
    controller.handle_event(InputEvent::ToolSelected(Tool::Cut));
    drag(&mut controller, pos2(0.0, 0.0), pos2(40.0, 40.0));
    assert!(controller.selected_region().is_some());

    key(&mut controller, Key::Delete, Modifiers::NONE);
    assert_eq!(controller.document().regions().count(), 0);

    key(&mut controller, Key::Z, Modifiers::COMMAND);
    assert_eq!(controller.document().regions().count(), 1);
}

#[test]
fn test_stroke_settings_apply_to_new_shapes() {
    let mut controller = controller();
    controller.handle_event(InputEvent::SetStrokeColor(egui::Color32::RED));
    controller.handle_event(InputEvent::SetStrokeWidth(100.0));
    controller.handle_event(InputEvent::ToolSelected(Tool::Line));
    drag(&mut controller, pos2(0.0, 0.0), pos2(30.0, 30.0));

    let style = controller.document().shapes().next().unwrap().style();
    assert_eq!(style.color, egui::Color32::RED);
    assert_eq!(style.width, 20.0);

    controller.handle_event(InputEvent::ResetColors);
    assert_eq!(controller.stroke_color(), egui::Color32::BLACK);
}

#[test]
fn test_zoom_is_clamped() {
    let mut controller = controller();
    for _ in 0..20 {
        controller.handle_event(InputEvent::ZoomIn);
    }
    assert_eq!(controller.zoom(), 4.0);
    for _ in 0..40 {
        controller.handle_event(InputEvent::ZoomOut);
    }
    assert_eq!(controller.zoom(), 0.25);
}

#[test]
fn test_export_failure_is_reported_as_notice() {
    let mut controller = Controller::new(OverlayConfig::default(), Rect::ZERO);
    controller.take_notices();

    let result = controller.export_png(std::path::Path::new("never_written.png"));
    assert!(result.is_err());
    let notices = controller.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
}
