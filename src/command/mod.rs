mod action;
mod history;

pub use action::Action;
pub use history::UndoLog;
