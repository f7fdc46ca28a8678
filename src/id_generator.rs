use std::sync::atomic::{AtomicUsize, Ordering};

/// Identifier shared by every element kind on the canvas
pub type ElementId = usize;

// Single static counter for all elements
static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id() -> ElementId {
    NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed)
}
