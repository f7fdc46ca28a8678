use egui::color_picker::{Alpha, color_edit_button_srgba};

use super::UiAction;
use crate::components::ToolButton;
use crate::config::STROKE_WIDTH_RANGE;
use crate::controller::Controller;
use crate::input::InputEvent;
use crate::tool::Tool;

/// Floating tool palette. Returns what the user asked for this frame.
pub fn tools_panel(ctx: &egui::Context, controller: &Controller) -> Vec<UiAction> {
    let mut actions = Vec::new();

    egui::Window::new("Tools")
        .default_pos(egui::pos2(20.0, 20.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            if let Some(event) = drawing_mode_button(ui, controller) {
                actions.push(event.into());
            }
            ui.separator();

            ui.horizontal_wrapped(|ui| {
                for tool in Tool::ALL {
                    let selected = controller.active_tool() == Some(tool);
                    if ToolButton::new(tool, selected).show(ui).clicked() {
                        actions.push(InputEvent::ToolSelected(tool).into());
                    }
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Stroke:");
                let mut stroke = controller.stroke_color();
                if color_edit_button_srgba(ui, &mut stroke, Alpha::OnlyBlend).changed() {
                    actions.push(InputEvent::SetStrokeColor(stroke).into());
                }
                ui.label("Fill:");
                let mut fill = controller.fill_color();
                if color_edit_button_srgba(ui, &mut fill, Alpha::OnlyBlend).changed() {
                    actions.push(InputEvent::SetFillColor(fill).into());
                }
                if ui.small_button("Reset").clicked() {
                    actions.push(InputEvent::ResetColors.into());
                }
            });

            ui.horizontal(|ui| {
                ui.label("Width:");
                let mut width = controller.stroke_width();
                if ui
                    .add(egui::Slider::new(&mut width, STROKE_WIDTH_RANGE))
                    .changed()
                {
                    actions.push(InputEvent::SetStrokeWidth(width).into());
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                let history = controller.history();
                if ui
                    .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    actions.push(InputEvent::Undo.into());
                }
                if ui
                    .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    actions.push(InputEvent::Redo.into());
                }
                if ui
                    .add_enabled(
                        controller.selected_region().is_some(),
                        egui::Button::new("Delete"),
                    )
                    .clicked()
                {
                    actions.push(InputEvent::DeleteSelection.into());
                }
            });

            ui.horizontal(|ui| {
                let grid = controller.grid();
                if ui.selectable_label(grid.is_shown(), "Grid").clicked() {
                    actions.push(InputEvent::ToggleGrid.into());
                }
                if ui.selectable_label(grid.snap_enabled(), "Snap").clicked() {
                    actions.push(InputEvent::ToggleSnap.into());
                }
                ui.label(format!("cell {:.0}", grid.cell_size()));
            });

            ui.horizontal(|ui| {
                if ui.button("−").clicked() {
                    actions.push(InputEvent::ZoomOut.into());
                }
                ui.label(format!("{:.0}%", controller.zoom() * 100.0));
                if ui.button("+").clicked() {
                    actions.push(InputEvent::ZoomIn.into());
                }
                if ui.button("💾 Export").clicked() {
                    actions.push(UiAction::Export);
                }
            });

            ui.separator();
            egui::CollapsingHeader::new("History")
                .default_open(false)
                .show(ui, |ui| {
                    let history = controller.history();
                    egui::Grid::new("command_history_grid")
                        .num_columns(2)
                        .spacing([40.0, 4.0])
                        .striped(true)
                        .show(ui, |ui| {
                            ui.strong("Undo Stack");
                            ui.strong("Redo Stack");
                            ui.end_row();

                            let undo_stack = history.undo_stack();
                            let redo_stack = history.redo_stack();
                            for i in 0..undo_stack.len().max(redo_stack.len()) {
                                ui.label(undo_stack.get(i).map_or("", |a| a.label()));
                                ui.label(redo_stack.get(i).map_or("", |a| a.label()));
                                ui.end_row();
                            }
                        });
                });
        });

    actions
}

/// Compact palette shown while drawing is stopped: only the START button
pub fn control_panel(ctx: &egui::Context, controller: &Controller) -> Vec<UiAction> {
    let mut actions = Vec::new();
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.centered_and_justified(|ui| {
            if let Some(event) = drawing_mode_button(ui, controller) {
                actions.push(event.into());
            }
        });
    });
    actions
}

fn drawing_mode_button(ui: &mut egui::Ui, controller: &Controller) -> Option<InputEvent> {
    let (label, color) = if controller.is_drawing_active() {
        ("■ STOP", egui::Color32::from_rgb(255, 59, 48))
    } else {
        ("▶ START", egui::Color32::from_rgb(52, 199, 89))
    };
    let button = egui::Button::new(egui::RichText::new(label).strong().color(egui::Color32::WHITE))
        .fill(color);
    ui.add(button)
        .clicked()
        .then_some(InputEvent::ToggleDrawingMode)
}
