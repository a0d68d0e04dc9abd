use crate::users::user_id::UserId;
use lru::LruCache;
use std::num::NonZeroUsize;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub clears: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64) / (total as f64)
        }
    }
}

/// Hashed colors by user id. Entries are pure recomputations, so evicting
/// one only costs a rehash on the next lookup.
pub struct ColorCache {
    cache: LruCache<UserId, String>,
    stats: CacheStats,
}

impl ColorCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        ColorCache {
            cache: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached color, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, id: &UserId, compute: F) -> String
    where
        F: FnOnce(&UserId) -> String,
    {
        if let Some(color) = self.cache.get(id) {
            self.stats.hits += 1;
            return color.clone();
        }

        self.stats.misses += 1;
        let color = compute(id);
        if let Some((evicted, _)) = self.cache.push(id.clone(), color.clone()) {
            if &evicted != id {
                self.stats.evictions += 1;
            }
        }
        color
    }

    pub fn peek(&self, id: &UserId) -> Option<&String> {
        self.cache.peek(id)
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drops every entry. Used whenever the override table changes.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.clears += 1;
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(color: &str) -> impl FnOnce(&UserId) -> String + '_ {
        move |_: &UserId| color.to_string()
    }

    #[test]
    fn cache_creation() {
        let cache = ColorCache::new(4);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        assert_eq!(ColorCache::new(0).capacity(), 1);
    }

    #[test]
    fn miss_then_hit() {
        let mut cache = ColorCache::new(4);
        let id = UserId::new("ash");

        assert_eq!(cache.get_or_insert_with(&id, fixed("#111111")), "#111111");
        // a hit never calls the closure, so the stale value stays
        assert_eq!(cache.get_or_insert_with(&id, fixed("#222222")), "#111111");

        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn eviction_counts_only_displaced_entries() {
        let mut cache = ColorCache::new(3);
        for name in ["a", "b", "c", "d", "e"] {
            cache.get_or_insert_with(&UserId::new(name), fixed("#000000"));
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.stats().evictions, 2);
        assert!(cache.peek(&UserId::new("a")).is_none());
        assert!(cache.peek(&UserId::new("e")).is_some());
    }

    #[test]
    fn hit_rate_calculation() {
        let mut cache = ColorCache::new(4);
        let id = UserId::new("misty");
        cache.get_or_insert_with(&id, fixed("#000000"));
        for _ in 0..10 {
            cache.get_or_insert_with(&id, fixed("#000000"));
        }
        assert!((cache.stats().hit_rate() - 0.909).abs() < 0.01);
    }

    #[test]
    fn clear_cache() {
        let mut cache = ColorCache::new(4);
        cache.get_or_insert_with(&UserId::new("a"), fixed("#000000"));
        cache.get_or_insert_with(&UserId::new("b"), fixed("#000000"));
        assert_eq!(cache.len(), 2);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().clears, 1);
    }
}
