use egui::{Align2, Color32, Pos2, Rect, ViewportCommand};

use crate::capture::ScreenshotsCapture;
use crate::config::OverlayConfig;
use crate::controller::{Controller, Notice, NoticeKind};
use crate::input::{InputEvent, Request};
use crate::panels::{PointerTracker, UiAction, central_panel, control_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::GestureState;

/// How long a notice stays on screen, in seconds
const NOTICE_DURATION: f64 = 2.5;
const DEFAULT_TEXT: &str = "Text";
/// Window size while drawing is stopped and only the START button shows
pub const CONTROL_SIZE: [f32; 2] = [160.0, 56.0];

/// The overlay window: a transparent always-on-top canvas with a floating
/// tool palette
pub struct OverlayApp {
    controller: Controller,
    renderer: Renderer,
    pointer: PointerTracker,
    /// Contents of the text prompt while a placement is pending
    text_buffer: String,
    /// Visible notices and the time they expire
    notices: Vec<(Notice, f64)>,
    /// Drawing mode the window was last configured for
    window_drawing: bool,
    /// Last window position forwarded to the capture backend
    window_origin: Option<Pos2>,
}

impl OverlayApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config: OverlayConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Starting overlay with {config:?}");

        let capture = Box::new(ScreenshotsCapture::default());
        Self {
            controller: Controller::with_capture(config, Rect::ZERO, capture),
            renderer: Renderer::new(),
            pointer: PointerTracker::default(),
            text_buffer: String::new(),
            notices: Vec::new(),
            window_drawing: false,
            window_origin: None,
        }
    }

    /// Grow to a fullscreen canvas on START, shrink back to the control on STOP
    fn sync_window(&mut self, ctx: &egui::Context) {
        let drawing = self.controller.is_drawing_active();
        if drawing != self.window_drawing {
            self.window_drawing = drawing;
            self.pointer = PointerTracker::default();
            if drawing {
                ctx.send_viewport_cmd(ViewportCommand::Fullscreen(true));
            } else {
                ctx.send_viewport_cmd(ViewportCommand::Fullscreen(false));
                ctx.send_viewport_cmd(ViewportCommand::InnerSize(CONTROL_SIZE.into()));
            }
        }

        let origin = ctx.input(|i| i.viewport().inner_rect).map(|rect| rect.min);
        if origin.is_some() && origin != self.window_origin {
            self.window_origin = origin;
            if let Some(origin) = origin {
                self.controller.handle_event(InputEvent::WindowMoved(origin));
            }
        }
    }

    fn handle_request(&mut self, request: Request) {
        match request {
            Request::PromptText { .. } => self.text_buffer = DEFAULT_TEXT.to_owned(),
            Request::Export => self.export(),
        }
    }

    fn export(&mut self) {
        if let Ok(path) = self.controller.export_to_default_path() {
            log::info!("Drawing exported to {}", path.display());
        }
    }

    fn text_prompt(&mut self, ctx: &egui::Context) {
        let GestureState::PlacingText { at } = *self.controller.gesture() else {
            return;
        };

        let mut answer = None;
        egui::Window::new("Add Text")
            .fixed_pos(at)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let edit = ui.text_edit_singleline(&mut self.text_buffer);
                edit.request_focus();
                let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || entered {
                        answer = Some(InputEvent::TextSubmitted(self.text_buffer.clone()));
                    }
                    if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        answer = Some(InputEvent::TextCancelled);
                    }
                });
            });

        if let Some(event) = answer {
            self.controller.handle_event(event);
            self.text_buffer.clear();
        }
    }

    fn show_notices(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        for notice in self.controller.take_notices() {
            self.notices.push((notice, now + NOTICE_DURATION));
        }
        self.notices.retain(|(_, expires)| *expires > now);
        if self.notices.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
            .interactable(false)
            .show(ctx, |ui| {
                for (notice, _) in &self.notices {
                    let accent = match notice.kind {
                        NoticeKind::Info => Color32::from_rgb(0, 122, 255),
                        NoticeKind::Success => Color32::from_rgb(52, 199, 89),
                        NoticeKind::Error => Color32::from_rgb(255, 59, 48),
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.colored_label(accent, egui::RichText::new(&notice.title).strong());
                        ui.label(&notice.message);
                    });
                }
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

impl eframe::App for OverlayApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.controller.config());
    }

    /// Fully transparent so the desktop shows through the canvas
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let drawing = self.controller.is_drawing_active();
        let actions = if drawing {
            tools_panel(ctx, &self.controller)
        } else {
            control_panel(ctx, &self.controller)
        };

        let mut requests = Vec::new();
        for action in actions {
            match action {
                UiAction::Event(event) => requests.extend(self.controller.handle_event(event)),
                UiAction::Export => requests.push(Request::Export),
            }
        }

        if drawing {
            self.text_prompt(ctx);
            requests.extend(central_panel(
                ctx,
                &mut self.controller,
                &mut self.renderer,
                &mut self.pointer,
            ));
        }
        self.sync_window(ctx);
        for request in requests {
            self.handle_request(request);
        }

        self.show_notices(ctx);
        if self.pointer.is_pressed() {
            ctx.request_repaint();
        }
    }
}
