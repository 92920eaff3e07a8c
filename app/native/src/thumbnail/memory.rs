//! Bounded in-memory layer of the thumbnail cache.
//!
//! One LRU holds every rendition (all thumbnail sizes and `Original`), bounded
//! by entry count. Every hit and every insert refreshes recency; inserting into
//! a full cache evicts exactly the least recently used entry first, so the
//! length never exceeds the capacity.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use super::Thumbnail;
use super::key::CacheKey;

/// Thread-safe LRU of decoded images.
///
/// The lock is held only for map operations; callers decode outside of it.
pub struct MemoryCache {
    entries: Mutex<LruCache<CacheKey, Thumbnail>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { entries: Mutex::new(LruCache::new(capacity)) }
    }

    /// Returns the entry for `key`, marking it most recently used.
    pub fn get(&self, key: &CacheKey) -> Option<Thumbnail> { self.entries.lock().get(key).cloned() }

    /// Inserts or replaces `key`, marking it most recently used.
    ///
    /// Returns the entry evicted to make room, if any.
    pub fn insert(&self, key: CacheKey, image: Thumbnail) -> Option<CacheKey> {
        let mut entries = self.entries.lock();
        match entries.push(key.clone(), image) {
            Some((evicted, _)) if evicted != key => Some(evicted),
            _ => None,
        }
    }

    /// Returns `true` if `key` is cached, without touching recency.
    pub fn contains(&self, key: &CacheKey) -> bool { self.entries.lock().contains(key) }

    pub fn len(&self) -> usize { self.entries.lock().len() }

    pub fn is_empty(&self) -> bool { self.entries.lock().is_empty() }

    pub fn capacity(&self) -> NonZeroUsize { self.entries.lock().cap() }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.lock().iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn clear(&self) { self.entries.lock().clear(); }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;
    use std::time::UNIX_EPOCH;

    use image::DynamicImage;

    use super::*;
    use crate::thumbnail::key::{ThumbnailSize, derive_key};

    fn key(name: &str) -> CacheKey {
        derive_key(Path::new(name), ThumbnailSize::max(100).unwrap(), UNIX_EPOCH)
    }

    fn image() -> Thumbnail { Arc::new(DynamicImage::new_rgb8(1, 1)) }

    fn cache(capacity: usize) -> MemoryCache {
        MemoryCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn test_insert_beyond_capacity_evicts_lru() {
        let cache = cache(2);
        assert_eq!(cache.insert(key("a"), image()), None);
        assert_eq!(cache.insert(key("b"), image()), None);
        assert_eq!(cache.insert(key("c"), image()), Some(key("a")));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&key("a")));
    }

    #[test]
    fn test_get_refreshes_recency() {
        let cache = cache(2);
        cache.insert(key("a"), image());
        cache.insert(key("b"), image());
        assert!(cache.get(&key("a")).is_some());

        assert_eq!(cache.insert(key("c"), image()), Some(key("b")));
        assert!(cache.contains(&key("a")));
    }

    #[test]
    fn test_reinsert_same_key_does_not_evict() {
        let cache = cache(2);
        cache.insert(key("a"), image());
        cache.insert(key("b"), image());
        assert_eq!(cache.insert(key("a"), image()), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.keys(), vec![key("a"), key("b")]);
    }

    #[test]
    fn test_keys_are_mru_first() {
        let cache = cache(3);
        cache.insert(key("a"), image());
        cache.insert(key("b"), image());
        cache.insert(key("c"), image());
        cache.get(&key("a"));
        assert_eq!(cache.keys(), vec![key("a"), key("c"), key("b")]);
    }

    #[test]
    fn test_clear() {
        let cache = cache(3);
        cache.insert(key("a"), image());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity().get(), 3);
    }
}
