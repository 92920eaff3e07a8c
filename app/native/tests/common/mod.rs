//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use image::{DynamicImage, RgbImage};
use wallgrid_lib::thumbnail::{FileImageLoader, ImageLoader};
use wallgrid_lib::{CacheOptions, ThumbnailCache, ThumbnailError};

/// Upper bound for anything a test waits on.
pub const DEADLINE: Duration = Duration::from_secs(20);

/// Writes a black `width` x `height` PNG and returns its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    RgbImage::new(width, height).save(&path).unwrap();
    path
}

/// Writes `count` small PNGs named `img1.png`, `img2.png`, ... into `dir`.
pub fn write_pngs(dir: &Path, count: usize) -> Vec<PathBuf> {
    (1..=count).map(|i| write_png(dir, &format!("img{i}.png"), 16, 12)).collect()
}

/// Decodes through [`FileImageLoader`], counting calls and optionally sleeping first.
#[derive(Default)]
pub struct TestLoader {
    pub delay: Duration,
    loads: AtomicUsize,
}

impl TestLoader {
    pub fn slow(delay: Duration) -> Self { Self { delay, loads: AtomicUsize::new(0) } }

    pub fn loads(&self) -> usize { self.loads.load(Ordering::SeqCst) }
}

impl ImageLoader for TestLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage, ThumbnailError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        FileImageLoader.load(path)
    }
}

/// Builds a cache over `disk_root` that decodes with `loader`.
pub fn cache_with(disk_root: &Path, loader: &Arc<TestLoader>) -> Arc<ThumbnailCache> {
    let loader: Arc<dyn ImageLoader> = loader.clone();
    Arc::new(ThumbnailCache::with_loader(CacheOptions::new(disk_root), loader))
}

/// Polls `condition` every few milliseconds until it holds or [`DEADLINE`] passes.
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + DEADLINE;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
