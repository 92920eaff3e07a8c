//! Content-addressed thumbnail cache.
//!
//! [`ThumbnailCache::get`] answers a (path, size) request from the cheapest
//! available source:
//!
//! 1. the in-memory LRU ([`memory`]), without touching disk;
//! 2. the on-disk store ([`disk`]), for thumbnail sizes only;
//! 3. the original file, decoded through an [`ImageLoader`], resized and then
//!    persisted (best-effort) and remembered.
//!
//! All three layers are addressed by the same [`CacheKey`], which folds in the
//! source's modification time, so an edited source is never served stale.

pub mod disk;
mod error;
pub mod key;
mod loader;
pub mod memory;
pub mod processing;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;

pub use self::disk::DiskCache;
pub use self::error::ThumbnailError;
pub use self::key::{CacheKey, ThumbnailSize, derive_key, key_for_file};
pub use self::loader::{FileImageLoader, ImageLoader};
pub use self::memory::MemoryCache;
use crate::cache::default_thumbnail_root;
use crate::config::ThumbnailConfig;
use crate::constants::DEFAULT_MEMORY_ENTRIES;

/// A decoded image shared between the cache and its callers.
pub type Thumbnail = Arc<DynamicImage>;

/// Construction parameters for a [`ThumbnailCache`].
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Root of the on-disk layer; entries live under `{disk_root}/{size}/`.
    pub disk_root: PathBuf,
    /// Maximum number of decoded images kept in memory, across all sizes.
    pub memory_entries: NonZeroUsize,
}

impl CacheOptions {
    #[must_use]
    pub fn new(disk_root: impl Into<PathBuf>) -> Self {
        Self { disk_root: disk_root.into(), memory_entries: default_memory_entries() }
    }

    /// Sets the in-memory capacity. Zero is raised to one.
    #[must_use]
    pub fn with_memory_entries(mut self, entries: usize) -> Self {
        self.memory_entries = NonZeroUsize::new(entries).unwrap_or(NonZeroUsize::MIN);
        self
    }
}

impl Default for CacheOptions {
    fn default() -> Self { Self::new(default_thumbnail_root()) }
}

fn default_memory_entries() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_MEMORY_ENTRIES).unwrap_or(NonZeroUsize::MIN)
}

/// Two-level (memory, disk) cache of decoded, resized images.
///
/// Safe to share between the UI thread and the prefetch worker behind an
/// `Arc`. Decoding and resizing never run under the memory lock; two threads
/// missing on the same key at once both do the work and the later insert wins.
pub struct ThumbnailCache {
    memory: MemoryCache,
    disk: DiskCache,
    loader: Arc<dyn ImageLoader>,
}

impl ThumbnailCache {
    /// Creates a cache that decodes originals with [`FileImageLoader`].
    #[must_use]
    pub fn new(options: CacheOptions) -> Self {
        Self::with_loader(options, Arc::new(FileImageLoader))
    }

    /// Creates a cache that decodes originals with `loader`.
    #[must_use]
    pub fn with_loader(options: CacheOptions, loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            memory: MemoryCache::new(options.memory_entries),
            disk: DiskCache::new(options.disk_root),
            loader,
        }
    }

    /// Creates a cache from the `thumbnails` configuration section.
    #[must_use]
    pub fn from_config(config: &ThumbnailConfig) -> Self {
        let options = CacheOptions::new(config.thumbnail_root())
            .with_memory_entries(config.memory_entries);
        Self::new(options)
    }

    /// Returns the image for `path` at `size`, populating the cache on the way.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbnailError::NotFound`] if the source is missing (nothing is
    /// cached in that case), and [`ThumbnailError::Decode`] or
    /// [`ThumbnailError::Io`] if the original cannot be read. Failing to persist
    /// a freshly generated thumbnail is logged and otherwise ignored.
    pub fn get(&self, path: &Path, size: ThumbnailSize) -> Result<Thumbnail, ThumbnailError> {
        let key = key_for_file(path, size)?;

        if let Some(image) = self.memory.get(&key) {
            return Ok(image);
        }

        let entry_path = self.disk.entry_path(&key, size);

        if let Some(entry_path) = entry_path.as_deref()
            && let Some(image) = self.disk.load(entry_path)
        {
            tracing::trace!(path = %path.display(), %size, "thumbnail served from disk cache");
            return Ok(self.remember(key, image));
        }

        let original = self.loader.load(path)?;

        let image = match size.max_dimension() {
            None => original,
            Some(max) => {
                let resized = processing::resize_to_max(&original, max);
                if let Some(entry_path) = entry_path.as_deref() {
                    self.persist(path, entry_path, &resized);
                }
                resized
            }
        };

        tracing::debug!(
            path = %path.display(),
            %size,
            width = image.width(),
            height = image.height(),
            "thumbnail generated from original"
        );

        Ok(self.remember(key, image))
    }

    /// Computes the current cache key for `path` at `size`.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbnailError::NotFound`] if the file cannot be stat'ed.
    pub fn key_for(&self, path: &Path, size: ThumbnailSize) -> Result<CacheKey, ThumbnailError> {
        key_for_file(path, size)
    }

    /// Returns where the disk entry for `key` at `size` lives (or would live).
    #[must_use]
    pub fn disk_path(&self, key: &CacheKey, size: ThumbnailSize) -> Option<PathBuf> {
        self.disk.entry_path(key, size)
    }

    /// Root directory of the on-disk layer.
    #[must_use]
    pub fn disk_root(&self) -> &Path { self.disk.root() }

    /// Number of decoded images currently held in memory.
    #[must_use]
    pub fn memory_len(&self) -> usize { self.memory.len() }

    /// Maximum number of decoded images held in memory.
    #[must_use]
    pub fn memory_capacity(&self) -> usize { self.memory.capacity().get() }

    /// Keys held in memory, most recently used first.
    #[must_use]
    pub fn cached_keys(&self) -> Vec<CacheKey> { self.memory.keys() }

    /// Drops every in-memory entry. The disk layer is left untouched.
    pub fn clear_memory(&self) { self.memory.clear(); }

    fn remember(&self, key: CacheKey, image: DynamicImage) -> Thumbnail {
        let image = Arc::new(image);
        if let Some(evicted) = self.memory.insert(key, Arc::clone(&image)) {
            tracing::trace!(key = %evicted, "evicted least recently used thumbnail");
        }
        image
    }

    fn persist(&self, source: &Path, entry_path: &Path, image: &DynamicImage) {
        if let Err(err) = self.disk.store(entry_path, image) {
            tracing::warn!(
                path = %source.display(),
                entry = %entry_path.display(),
                error = %err,
                "failed to write thumbnail cache entry"
            );
        }
    }
}
