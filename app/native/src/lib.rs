//! Wallgrid - content-addressed thumbnail cache for image galleries.
//!
//! The library has two parts:
//!
//! - [`thumbnail::ThumbnailCache`] returns decoded, resized images for a
//!   (file, size) pair, preferring a bounded in-memory LRU, then an on-disk
//!   store, and only then the original file.
//! - [`prefetch::PrefetchWorker`] warms that cache on a background thread for
//!   the files around the directory being browsed, and can be paused whenever
//!   the foreground needs the CPU. Warmed paths are handed back through a
//!   [`prefetch::HandoffQueue`].
//!
//! The `wallgrid` binary in this crate is a thin command-line host around both.

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;
pub mod prefetch;
pub mod thumbnail;

pub use error::WallgridError;
pub use prefetch::{HandoffQueue, PrefetchOptions, PrefetchWorker, WorkerState};
pub use thumbnail::{CacheKey, CacheOptions, ThumbnailCache, ThumbnailError, ThumbnailSize};
