use super::cache::{CacheStats, ColorCache};
use super::hash::hash_color;
use super::hex::HexColor;
use crate::users::user_id::UserId;
use std::collections::BTreeMap;

pub type OverrideTable = BTreeMap<UserId, HexColor>;

/// Where an effective color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    Override,
    Hashed,
}

/// Owns the administrator override table and the hash cache. Build one at
/// startup and hand out `&mut` to callers; wrap it in a mutex if several
/// threads need it.
pub struct ColorAssigner {
    overrides: OverrideTable,
    cache: ColorCache,
}

impl ColorAssigner {
    pub fn new(overrides: OverrideTable, cache_capacity: usize) -> Self {
        Self {
            overrides,
            cache: ColorCache::new(cache_capacity),
        }
    }

    pub fn color_for(&mut self, name: &str) -> String {
        self.resolve(name).0
    }

    /// Effective color together with its origin.
    pub fn resolve(&mut self, name: &str) -> (String, ColorSource) {
        let id = UserId::new(name);
        if let Some(color) = self.overrides.get(&id) {
            return (color.as_str().to_string(), ColorSource::Override);
        }
        let color = self
            .cache
            .get_or_insert_with(&id, |id| hash_color(id.as_str()).hex);
        (color, ColorSource::Hashed)
    }

    pub fn override_for(&self, name: &str) -> Option<&HexColor> {
        self.overrides.get(&UserId::new(name))
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Returns the previous override, if any.
    pub fn set_override(&mut self, name: &str, color: HexColor) -> Option<HexColor> {
        let previous = self.overrides.insert(UserId::new(name), color);
        self.cache.clear();
        previous
    }

    pub fn remove_override(&mut self, name: &str) -> Option<HexColor> {
        let removed = self.overrides.remove(&UserId::new(name));
        if removed.is_some() {
            self.cache.clear();
        }
        removed
    }

    pub fn replace_overrides(&mut self, overrides: OverrideTable) {
        self.overrides = overrides;
        self.cache.clear();
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(OverrideTable::new(), super::cache::DEFAULT_CACHE_CAPACITY)
    }
}
