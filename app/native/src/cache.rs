//! Cache directory utilities.
//!
//! Resolves where the application keeps persistent cache data and summarizes
//! what the on-disk thumbnail layer currently holds. Uses the platform cache
//! directory (`~/.cache/wallgrid` on Linux, `~/Library/Caches/wallgrid` on macOS),
//! falling back to `/tmp/wallgrid` when no cache directory is available.

use std::fs;
use std::path::{Path, PathBuf};

use natord::compare;

use crate::constants::{APP_ID, THUMBNAILS_SUBDIR};

/// Returns the root cache directory for the application.
#[must_use]
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_ID}")),
        |cache| cache.join(APP_ID),
    )
}

/// Returns a cache subdirectory for the given component.
///
/// # Arguments
///
/// * `subdir` - The subdirectory name within the app's cache directory (e.g., `thumbnails`)
#[must_use]
pub fn get_cache_subdir(subdir: &str) -> PathBuf { get_cache_dir().join(subdir) }

/// Returns the default root of the on-disk thumbnail layer.
#[must_use]
pub fn default_thumbnail_root() -> PathBuf { get_cache_subdir(THUMBNAILS_SUBDIR) }

/// Disk usage of one size bucket of the thumbnail cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBucket {
    /// Directory name, the decimal max dimension.
    pub label: String,
    /// Number of cached files in the bucket.
    pub entries: usize,
    /// Total bytes used by the bucket.
    pub bytes: u64,
}

/// Summarizes the thumbnail cache rooted at `root`, one bucket per size directory.
///
/// Buckets are returned in natural order (`64`, `128`, `192`, ...). A missing root
/// yields an empty list.
///
/// # Errors
///
/// Returns an error if a directory exists but cannot be read.
pub fn summarize_thumbnail_root(root: &Path) -> std::io::Result<Vec<SizeBucket>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut buckets = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let mut entries = 0usize;
        let mut bytes = 0u64;
        for file in fs::read_dir(&path)? {
            let file = file?;
            let metadata = file.metadata()?;
            if metadata.is_file() {
                entries += 1;
                bytes += metadata.len();
            }
        }

        buckets.push(SizeBucket {
            label: entry.file_name().to_string_lossy().into_owned(),
            entries,
            bytes,
        });
    }

    buckets.sort_by(|a, b| compare(&a.label, &b.label));
    Ok(buckets)
}

/// Formats a byte count as a human-readable string.
///
/// # Arguments
///
/// * `bytes` - The number of bytes
///
/// # Returns
///
/// A human-readable string like "1.50 MB" or "256 bytes"
#[must_use]
#[allow(clippy::cast_precision_loss)] // Precision loss is acceptable for human-readable output
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}
