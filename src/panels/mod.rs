mod central_panel;
mod tools_panel;

pub use central_panel::{PointerTracker, central_panel};
pub use tools_panel::{control_panel, tools_panel};

use crate::input::InputEvent;

/// Something a panel asks the app to do after the frame's UI is laid out
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Event(InputEvent),
    Export,
}

impl From<InputEvent> for UiAction {
    fn from(event: InputEvent) -> Self {
        UiAction::Event(event)
    }
}
