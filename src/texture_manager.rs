use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;

use crate::element::CapturedRegion;
use crate::id_generator::ElementId;

/// Default number of region textures kept on the GPU
pub const DEFAULT_CACHE_SIZE: usize = 64;

/// Uploads captured region bitmaps once and hands out texture ids.
///
/// Region pixels never change after capture, so the element id alone is a
/// sufficient cache key.
pub struct TextureManager {
    texture_cache: HashMap<ElementId, TextureHandle>,
    /// Frame each texture was last requested in
    last_used: HashMap<ElementId, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Call once at the start of every frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    pub fn texture_for(&mut self, ctx: &Context, region: &CapturedRegion) -> TextureId {
        let id = region.id();
        self.last_used.insert(id, self.current_frame);
        if let Some(handle) = self.texture_cache.get(&id) {
            return handle.id();
        }

        let handle = ctx.load_texture(
            format!("region_{id}"),
            to_color_image(region.image()),
            TextureOptions::LINEAR,
        );
        let texture_id = handle.id();
        self.texture_cache.insert(id, handle);
        log::debug!("Uploaded texture for region {id}");
        self.prune_cache_if_needed();
        texture_id
    }

    pub fn invalidate_element(&mut self, id: ElementId) {
        self.texture_cache.remove(&id);
        self.last_used.remove(&id);
    }

    /// Evict the least recently used textures, never the ones used this frame
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }
        let mut entries: Vec<(ElementId, u64)> = self
            .last_used
            .iter()
            .filter(|(_, frame)| **frame < self.current_frame)
            .map(|(id, frame)| (*id, *frame))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let excess = self.texture_cache.len() - self.max_cache_size;
        for (id, _) in entries.into_iter().take(excess) {
            self.invalidate_element(id);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    pub fn is_cached(&self, id: ElementId) -> bool {
        self.texture_cache.contains_key(&id)
    }
}

fn to_color_image(image: &RgbaImage) -> ColorImage {
    let (width, height) = image.dimensions();
    ColorImage::from_rgba_unmultiplied([width as usize, height as usize], image.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn region() -> CapturedRegion {
        CapturedRegion::new(RgbaImage::new(4, 4), pos2(0.0, 0.0), vec2(4.0, 4.0))
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let region = region();

        let first = manager.texture_for(&ctx, &region);
        let second = manager.texture_for(&ctx, &region);

        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_invalidation() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let region = region();

        manager.texture_for(&ctx, &region);
        manager.invalidate_element(region.id());

        assert_eq!(manager.cache_size(), 0);
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let (a, b, c) = (region(), region(), region());

        manager.texture_for(&ctx, &a);
        manager.begin_frame();
        manager.texture_for(&ctx, &b);
        manager.begin_frame();
        manager.texture_for(&ctx, &c);

        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.is_cached(a.id()));
        assert!(manager.is_cached(b.id()));
        assert!(manager.is_cached(c.id()));
    }
}
