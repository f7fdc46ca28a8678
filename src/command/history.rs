use super::Action;
use crate::document::Document;

/// Linear undo/redo log. Both stacks are unbounded.
#[derive(Debug, Default)]
pub struct UndoLog {
    /// Actions that can be undone, most recent last
    undo_stack: Vec<Action>,
    /// Actions that can be redone, most recently undone last
    redo_stack: Vec<Action>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action whose effect is already visible
    pub fn commit(&mut self, action: Action) {
        log::info!("Committed {} (element {})", action.label(), action.element_id());
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Apply an action to the document and record it
    pub fn execute(&mut self, mut action: Action, doc: &mut Document) {
        action.apply(doc);
        self.commit(action);
    }

    /// Undo the most recent action. Returns false when there was nothing to undo.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        let Some(mut action) = self.undo_stack.pop() else {
            return false;
        };
        action.revert(doc);
        log::info!("Undid {} (element {})", action.label(), action.element_id());
        self.redo_stack.push(action);
        true
    }

    /// Replay the most recently undone action. Returns false when there was nothing to redo.
    pub fn redo(&mut self, doc: &mut Document) -> bool {
        let Some(mut action) = self.redo_stack.pop() else {
            return false;
        };
        action.apply(doc);
        log::info!("Redid {} (element {})", action.label(), action.element_id());
        self.undo_stack.push(action);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Action] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Action] {
        &self.redo_stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{CapturedRegion, Shape};
    use crate::geometry::build_path;
    use crate::tool::Tool;
    use egui::{Color32, pos2, vec2};
    use image::RgbaImage;

    fn line_action() -> Action {
        let path = build_path(Tool::Line, pos2(0.0, 0.0), pos2(10.0, 10.0)).unwrap();
        Action::AddShape(Shape::new(Tool::Line, path, Color32::BLACK, 3.0))
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut doc = Document::new();
        let mut log = UndoLog::new();
        assert!(!log.undo(&mut doc));
        assert!(!log.redo(&mut doc));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_execute_clears_redo() {
        let mut doc = Document::new();
        let mut log = UndoLog::new();
        log.execute(line_action(), &mut doc);
        log.undo(&mut doc);
        assert!(log.can_redo());

        log.execute(line_action(), &mut doc);
        assert!(!log.can_redo());
        assert!(!log.redo(&mut doc));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_redo_restores_dragged_region_position() {
        let mut doc = Document::new();
        let mut log = UndoLog::new();
        let region = CapturedRegion::new(RgbaImage::new(4, 4), pos2(0.0, 0.0), vec2(40.0, 40.0));
        let id = region.id();
        log.execute(Action::AddRegion(region), &mut doc);

        doc.region_mut(id).unwrap().set_position(pos2(100.0, 80.0));
        log.undo(&mut doc);
        assert!(doc.region(id).is_none());

        log.redo(&mut doc);
        assert_eq!(doc.region(id).unwrap().position(), pos2(100.0, 80.0));
    }

    #[test]
    fn test_delete_region_undo_restores_stacking_order() {
        let mut doc = Document::new();
        let mut log = UndoLog::new();
        let region = CapturedRegion::new(RgbaImage::new(4, 4), pos2(0.0, 0.0), vec2(40.0, 40.0));
        let id = region.id();
        log.execute(Action::AddRegion(region.clone()), &mut doc);
        log.execute(line_action(), &mut doc);

        log.execute(Action::DeleteRegion { region, index: 0 }, &mut doc);
        assert!(doc.region(id).is_none());
        assert_eq!(doc.len(), 1);

        log.undo(&mut doc);
        assert_eq!(doc.elements()[0].id(), id);

        log.redo(&mut doc);
        assert!(doc.region(id).is_none());
    }

    #[test]
    fn test_undo_redo_keeps_region_selection() {
        let mut doc = Document::new();
        let mut log = UndoLog::new();
        let region = CapturedRegion::new(RgbaImage::new(4, 4), pos2(0.0, 0.0), vec2(40.0, 40.0));
        let id = region.id();
        log.execute(Action::AddRegion(region), &mut doc);
        doc.select_region(Some(id));
        let before = doc.elements().to_vec();

        log.undo(&mut doc);
        assert!(doc.selected_region().is_none());

        log.redo(&mut doc);
        assert_eq!(doc.selected_region().map(CapturedRegion::id), Some(id));
        assert_eq!(doc.elements(), before.as_slice());
    }

    #[test]
    fn test_undoing_delete_reselects_region() {
        let mut doc = Document::new();
        let mut log = UndoLog::new();
        let region = CapturedRegion::new(RgbaImage::new(4, 4), pos2(0.0, 0.0), vec2(40.0, 40.0));
        let id = region.id();
        log.execute(Action::AddRegion(region.clone()), &mut doc);
        doc.select_region(Some(id));

        log.execute(Action::DeleteRegion { region, index: 0 }, &mut doc);
        assert!(doc.selected_region().is_none());

        log.undo(&mut doc);
        assert!(doc.region(id).unwrap().is_selected());
        assert_eq!(doc.selected_region().map(CapturedRegion::id), Some(id));
    }
}
