use std::collections::{HashMap, HashSet};

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::element::ObjectId;
use crate::error::TextureGenerationError;

/// Caches one texture per object, keyed by (object id, texture version).
///
/// A new version replaces the older ones of the same object; the least
/// recently used entries are dropped once the cache is full.
pub struct TextureManager {
    texture_cache: HashMap<(ObjectId, u64), TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<(ObjectId, u64), u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    max_cache_size: usize,
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

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or creates the texture for an object at the given version
    pub fn get_or_create_texture<F>(
        &mut self,
        id: ObjectId,
        texture_version: u64,
        generator: F,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        let cache_key = (id, texture_version);
        if let Some(handle) = self.texture_cache.get(&cache_key) {
            self.last_used.insert(cache_key, self.current_frame);
            return Ok(handle.id());
        }

        let image = generator()?;
        self.invalidate_element(id);
        self.prune_to_fit();

        let name = format!("object_{id}_v{texture_version}");
        let handle = ctx.load_texture(name, image, TextureOptions::LINEAR);
        let texture_id = handle.id();
        self.texture_cache.insert(cache_key, handle);
        self.last_used.insert(cache_key, self.current_frame);
        Ok(texture_id)
    }

    /// Invalidates all textures for a specific object
    pub fn invalidate_element(&mut self, id: ObjectId) {
        self.texture_cache.retain(|(cached, _), _| *cached != id);
        self.last_used.retain(|(cached, _), _| *cached != id);
    }

    /// Drop textures of objects that are no longer on the canvas
    pub fn retain_objects(&mut self, live: &HashSet<ObjectId>) {
        self.texture_cache.retain(|(id, _), _| live.contains(id));
        self.last_used.retain(|(id, _), _| live.contains(id));
    }

    /// Evict least recently used entries so one more fits
    fn prune_to_fit(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }
        let mut entries: Vec<((ObjectId, u64), u64)> =
            self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.texture_cache.len() + 1 - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn clear_cache(&mut self) {
        self.texture_cache.clear();
        self.last_used.clear();
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn get_texture(&self, id: ObjectId, version: u64) -> Option<&TextureHandle> {
        self.texture_cache.get(&(id, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_texture_generator() -> Result<ColorImage, TextureGenerationError> {
        Ok(ColorImage::new([10, 10], egui::Color32::WHITE))
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ObjectId::new();

        let first = manager
            .get_or_create_texture(id, 1, mock_texture_generator, &ctx)
            .unwrap();
        let second = manager
            .get_or_create_texture(id, 1, || Err(TextureGenerationError::EmptyBounds), &ctx)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_new_version_replaces_old() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ObjectId::new();

        manager.get_or_create_texture(id, 1, mock_texture_generator, &ctx).unwrap();
        manager.get_or_create_texture(id, 2, mock_texture_generator, &ctx).unwrap();

        assert_eq!(manager.cache_size(), 1);
        assert!(manager.get_texture(id, 1).is_none());
        assert!(manager.get_texture(id, 2).is_some());
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let ids = [ObjectId::new(), ObjectId::new(), ObjectId::new()];

        manager.get_or_create_texture(ids[0], 0, mock_texture_generator, &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture(ids[1], 0, mock_texture_generator, &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture(ids[2], 0, mock_texture_generator, &ctx).unwrap();

        assert_eq!(manager.cache_size(), 2);
        assert!(manager.get_texture(ids[0], 0).is_none());
        assert!(manager.get_texture(ids[1], 0).is_some());
        assert!(manager.get_texture(ids[2], 0).is_some());
    }

    #[test]
    fn test_failed_generation_keeps_cache() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ObjectId::new();
        manager.get_or_create_texture(id, 1, mock_texture_generator, &ctx).unwrap();

        let result =
            manager.get_or_create_texture(id, 2, || Err(TextureGenerationError::EmptyBounds), &ctx);
        assert!(result.is_err());
        assert!(manager.get_texture(id, 1).is_some());
    }

    #[test]
    fn test_retain_drops_removed_objects() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let kept = ObjectId::new();
        let gone = ObjectId::new();
        manager.get_or_create_texture(kept, 0, mock_texture_generator, &ctx).unwrap();
        manager.get_or_create_texture(gone, 0, mock_texture_generator, &ctx).unwrap();

        manager.retain_objects(&HashSet::from([kept]));
        assert_eq!(manager.cache_size(), 1);
        assert!(manager.get_texture(kept, 0).is_some());
    }
}
