use egui::Pos2;

use crate::element::{CapturedRegion, Element, Shape, TextAnnotation};
use crate::id_generator::ElementId;

/// The committed scene: every visible element in stacking order, bottom first
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
    selected_region: Option<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Place an element on top of the stack
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Place an element at a stacking position, clamped to the top
    pub fn insert(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    /// Take an element out of the scene, returning its former stacking index
    pub fn remove(&mut self, id: ElementId) -> Option<(usize, Element)> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        if self.selected_region == Some(id) {
            self.selected_region = None;
        }
        let element = self.elements.remove(index);
        log::debug!("Removed {} {id} from index {index}", element.element_type());
        Some((index, element))
    }

    fn find(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.elements.iter().filter_map(|e| match e {
            Element::Shape(s) => Some(s),
            _ => None,
        })
    }

    pub fn regions(&self) -> impl Iterator<Item = &CapturedRegion> {
        self.elements.iter().filter_map(Element::as_region)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextAnnotation> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn region(&self, id: ElementId) -> Option<&CapturedRegion> {
        self.find(id).and_then(Element::as_region)
    }

    pub fn region_mut(&mut self, id: ElementId) -> Option<&mut CapturedRegion> {
        self.elements
            .iter_mut()
            .find(|e| e.id() == id)
            .and_then(Element::as_region_mut)
    }

    /// Topmost captured region under the given position
    pub fn region_at(&self, pos: Pos2) -> Option<ElementId> {
        self.regions()
            .filter(|r| r.contains(pos))
            .last()
            .map(CapturedRegion::id)
    }

    pub fn selected_region(&self) -> Option<&CapturedRegion> {
        self.selected_region.and_then(|id| self.region(id))
    }

    /// Move the selection flag to `id`, or clear it with `None`
    pub fn select_region(&mut self, id: Option<ElementId>) {
        if let Some(previous) = self.selected_region.take() {
            if let Some(region) = self.region_mut(previous) {
                region.set_selected(false);
            }
        }
        if let Some(id) = id {
            if let Some(region) = self.region_mut(id) {
                region.set_selected(true);
                self.selected_region = Some(id);
            }
        }
    }
}
