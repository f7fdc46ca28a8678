use crate::document::Document;
use crate::element::{CapturedRegion, Element, Shape, TextAnnotation};
use crate::id_generator::ElementId;

/// One undoable unit of committed state change.
///
/// Each variant carries the element it concerns. While the action sits on
/// the redo stack the payload is the only copy of that element, so undo
/// refreshes it from the live document first (a dragged region comes back
/// where it was left).
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddShape(Shape),
    AddRegion(CapturedRegion),
    AddText(TextAnnotation),
    /// Removal of a captured region from stacking position `index`
    DeleteRegion {
        region: CapturedRegion,
        index: usize,
    },
}

impl Action {
    pub fn element_id(&self) -> ElementId {
        match self {
            Action::AddShape(shape) => shape.id(),
            Action::AddRegion(region) | Action::DeleteRegion { region, .. } => region.id(),
            Action::AddText(text) => text.id(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::AddShape(_) => "Add Shape",
            Action::AddRegion(_) => "Capture Region",
            Action::AddText(_) => "Add Text",
            Action::DeleteRegion { .. } => "Delete Region",
        }
    }

    /// Perform (or replay) the action's visual effect
    pub fn apply(&mut self, doc: &mut Document) {
        match self {
            Action::AddShape(shape) => doc.push(shape.clone().into()),
            Action::AddRegion(region) => {
                doc.push(region.clone().into());
                restore_selection(doc, region);
            }
            Action::AddText(text) => doc.push(text.clone().into()),
            Action::DeleteRegion { region, index } => {
                // The payload keeps its selection flag so undo can restore it
                if let Some((at, Element::Region(live))) = doc.remove(region.id()) {
                    *region = live;
                    *index = at;
                }
            }
        }
    }

    /// Reverse the action's visual effect
    pub fn revert(&mut self, doc: &mut Document) {
        match self {
            Action::AddShape(shape) => {
                doc.remove(shape.id());
            }
            Action::AddText(text) => {
                doc.remove(text.id());
            }
            Action::AddRegion(region) => {
                if let Some((_, Element::Region(live))) = doc.remove(region.id()) {
                    *region = live;
                }
            }
            Action::DeleteRegion { region, index } => {
                doc.insert(*index, region.clone().into());
                restore_selection(doc, region);
            }
        }
    }
}

/// A region that was selected when it left the scene comes back selected
fn restore_selection(doc: &mut Document, region: &CapturedRegion) {
    if region.is_selected() {
        doc.select_region(Some(region.id()));
    }
}
