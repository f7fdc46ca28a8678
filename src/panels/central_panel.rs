use egui::{Pos2, Sense};

use crate::controller::Controller;
use crate::input::{InputEvent, Request};
use crate::renderer::Renderer;

/// Turns egui's per-frame pointer snapshot into down / dragged / up events.
///
/// Only presses that start on the canvas are followed, so clicks on floating
/// windows never reach the controller.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pressed_at: Option<Pos2>,
}

impl PointerTracker {
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Events for this frame
    ///
    /// Args:
    ///     pressed / released: Primary button edges this frame
    ///     over_canvas: Whether the pointer is on the canvas rather than a window
    ///     pos: Latest pointer position, if known
    pub fn update(
        &mut self,
        pressed: bool,
        released: bool,
        over_canvas: bool,
        pos: Option<Pos2>,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if let Some(pos) = pos {
            if pressed && over_canvas && self.pressed_at.is_none() {
                self.pressed_at = Some(pos);
                events.push(InputEvent::PointerDown(pos));
            } else if self.pressed_at.is_some_and(|last| last != pos) {
                self.pressed_at = Some(pos);
                events.push(InputEvent::PointerDragged(pos));
            }
        }

        // A release always ends the gesture, even when egui has lost track of
        // the pointer; the last known position stands in for it
        if released {
            if let Some(last) = self.pressed_at.take() {
                events.push(InputEvent::PointerUp(pos.unwrap_or(last)));
            }
        }
        events
    }
}

/// Full-window transparent canvas. Feeds pointer and key input to the
/// controller and paints the scene.
pub fn central_panel(
    ctx: &egui::Context,
    controller: &mut Controller,
    renderer: &mut Renderer,
    pointer: &mut PointerTracker,
) -> Vec<Request> {
    let mut requests = Vec::new();

    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let canvas_rect = response.rect;
            if canvas_rect != controller.canvas() {
                controller.handle_event(InputEvent::CanvasResized(canvas_rect));
            }

            let (pressed, released, pos) = ui.input(|i| {
                (
                    i.pointer.primary_pressed(),
                    i.pointer.primary_released(),
                    i.pointer.interact_pos(),
                )
            });
            for event in pointer.update(pressed, released, response.hovered(), pos) {
                requests.extend(controller.handle_event(event));
            }

            // Keys go to the text prompt while it has focus
            if !ctx.wants_keyboard_input() {
                let keys: Vec<InputEvent> = ui.input(|i| {
                    i.events
                        .iter()
                        .filter_map(|event| match event {
                            egui::Event::Key {
                                key,
                                pressed: true,
                                modifiers,
                                ..
                            } => Some(InputEvent::KeyPressed {
                                key: *key,
                                modifiers: *modifiers,
                            }),
                            _ => None,
                        })
                        .collect()
                });
                for event in keys {
                    requests.extend(controller.handle_event(event));
                }
            }

            renderer.render(&painter, controller);
        });

    requests
}
