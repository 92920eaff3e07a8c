//! Cache key derivation.
//!
//! A [`CacheKey`] identifies one rendition of one source file: the absolute
//! path, the requested [`ThumbnailSize`] and the file's modification time at the
//! moment the key was computed. The key is a SHA-256 hex digest, so it doubles
//! as the in-memory map key and as a filesystem-safe file stem.
//!
//! Editing a source file changes its mtime and therefore its key. Entries
//! written under the old key are never looked up again and stay on disk as
//! orphans.

use std::fmt;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use super::error::ThumbnailError;

/// Requested rendition of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailSize {
    /// The decoded source image at its own dimensions.
    Original,
    /// Proportionally scaled so the larger side equals this many pixels.
    Max(NonZeroU32),
}

impl ThumbnailSize {
    /// Creates a `Max` size, or `None` for zero.
    #[must_use]
    pub const fn max(pixels: u32) -> Option<Self> {
        match NonZeroU32::new(pixels) {
            Some(pixels) => Some(Self::Max(pixels)),
            None => None,
        }
    }

    /// Returns the max dimension, or `None` for [`ThumbnailSize::Original`].
    #[must_use]
    pub const fn max_dimension(self) -> Option<u32> {
        match self {
            Self::Original => None,
            Self::Max(pixels) => Some(pixels.get()),
        }
    }

    /// Label used in cache keys and as the on-disk bucket directory name.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Original => "original".to_string(),
            Self::Max(pixels) => pixels.to_string(),
        }
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.label()) }
}

impl FromStr for ThumbnailSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }

        let pixels: u32 = s.parse().map_err(|_| format!("invalid thumbnail size: {s}"))?;
        Self::max(pixels).ok_or_else(|| "thumbnail size must be greater than zero".to_string())
    }
}

/// Opaque, fixed-length identifier of a (path, size, mtime) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the lowercase hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Derives the key for `path` at `size` as of `mtime`.
///
/// Pure: the same inputs always produce the same key, and changing any one of
/// them produces a different key.
#[must_use]
pub fn derive_key(path: &Path, size: ThumbnailSize, mtime: SystemTime) -> CacheKey {
    let mut hasher = Sha256::new();
    hasher.update(path.as_os_str().as_encoded_bytes());
    hasher.update(b"\0");
    hasher.update(size.label().as_bytes());
    hasher.update(b"\0");
    hasher.update(mtime_nanos(mtime).to_string().as_bytes());
    CacheKey(format!("{:x}", hasher.finalize()))
}

/// Stats `path` and derives its key from the current modification time.
///
/// Relative paths are made absolute against the working directory first so the
/// same file always hashes the same way.
///
/// # Errors
///
/// Returns [`ThumbnailError::NotFound`] if the file's metadata cannot be read or
/// the path is not a regular file.
pub fn key_for_file(path: &Path, size: ThumbnailSize) -> Result<CacheKey, ThumbnailError> {
    let absolute = absolute_path(path);
    let metadata =
        fs::metadata(&absolute).map_err(|_| ThumbnailError::NotFound(path.to_path_buf()))?;

    if !metadata.is_file() {
        return Err(ThumbnailError::NotFound(path.to_path_buf()));
    }

    let mtime = metadata.modified().unwrap_or_else(|err| {
        tracing::warn!(
            path = %path.display(),
            error = %err,
            "modification time unavailable, keying on the epoch"
        );
        UNIX_EPOCH
    });

    Ok(derive_key(&absolute, size, mtime))
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Signed nanoseconds relative to the Unix epoch, so pre-epoch times stay distinct.
fn mtime_nanos(mtime: SystemTime) -> i128 {
    match mtime.duration_since(UNIX_EPOCH) {
        Ok(after) => i128::try_from(after.as_nanos()).unwrap_or(i128::MAX),
        Err(before) => -i128::try_from(before.duration().as_nanos()).unwrap_or(i128::MAX),
    }
}
