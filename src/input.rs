use egui::{Color32, Key, Modifiers, Pos2, Rect};

use crate::tool::Tool;

/// Everything the chrome can tell the controller, delivered through
/// [`Controller::handle_event`](crate::Controller::handle_event)
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// START / STOP: while stopped the overlay lets clicks through and
    /// ignores pointer and key input
    ToggleDrawingMode,
    /// A palette button was clicked
    ToolSelected(Tool),
    /// Primary button pressed on the canvas
    PointerDown(Pos2),
    /// Pointer moved while the primary button is held
    PointerDragged(Pos2),
    /// Primary button released
    PointerUp(Pos2),
    /// A key was pressed while the overlay has focus
    KeyPressed { key: Key, modifiers: Modifiers },
    Undo,
    Redo,
    ToggleGrid,
    ToggleSnap,
    /// Abandon the current gesture and fall back to the default tool
    Cancel,
    /// Remove the selected captured region
    DeleteSelection,
    /// Answer to [`Request::PromptText`]
    TextSubmitted(String),
    /// The text prompt was dismissed
    TextCancelled,
    SetStrokeColor(Color32),
    SetFillColor(Color32),
    SetStrokeWidth(f32),
    ResetColors,
    ZoomIn,
    ZoomOut,
    /// The drawable area changed size
    CanvasResized(Rect),
    /// The window moved; carries its top-left corner in desktop coordinates
    WindowMoved(Pos2),
}

/// Work the controller cannot do alone and hands back to the chrome
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Ask the user for a string to place at `at`
    PromptText { at: Pos2 },
    /// Write the canvas to disk
    Export,
}

/// Translate a key press into the event it is bound to, if any.
///
/// command+Z undo, command+shift+Z redo, G grid, S snap, Escape and Q cancel,
/// Delete/Backspace removes the selected region. command+S is handled by the
/// controller itself since it produces a [`Request`].
pub fn shortcut_for(key: Key, modifiers: Modifiers) -> Option<InputEvent> {
    if modifiers.command {
        return match key {
            Key::Z if modifiers.shift => Some(InputEvent::Redo),
            Key::Z => Some(InputEvent::Undo),
            _ => None,
        };
    }
    match key {
        Key::G => Some(InputEvent::ToggleGrid),
        Key::S => Some(InputEvent::ToggleSnap),
        Key::Escape | Key::Q => Some(InputEvent::Cancel),
        Key::Delete | Key::Backspace => Some(InputEvent::DeleteSelection),
        _ => None,
    }
}
