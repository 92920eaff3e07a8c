//! Persistent on-disk layer of the thumbnail cache.
//!
//! Layout: `{root}/{size}/{key}.png`. Each size gets its own bucket directory,
//! created lazily on the first write, so sizes never collide and coexist
//! across size changes. `Original` renditions are never written here.
//!
//! Writes go to a temporary file in the bucket and are renamed into place, so
//! a reader never observes a half-written entry and concurrent writers of the
//! same key simply replace each other with identical bytes.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use tempfile::NamedTempFile;

use super::key::{CacheKey, ThumbnailSize};

/// Extension of on-disk entries.
pub const ENTRY_EXTENSION: &str = "png";

/// On-disk thumbnail store rooted at a directory.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    #[must_use]
    pub const fn new(root: PathBuf) -> Self { Self { root } }

    #[must_use]
    pub fn root(&self) -> &Path { &self.root }

    /// Returns the entry path for `key` at `size`, or `None` for `Original`.
    #[must_use]
    pub fn entry_path(&self, key: &CacheKey, size: ThumbnailSize) -> Option<PathBuf> {
        let bucket = size.max_dimension()?;
        Some(self.root.join(bucket.to_string()).join(format!("{key}.{ENTRY_EXTENSION}")))
    }

    /// Reads and decodes the entry at `path`.
    ///
    /// A missing or undecodable entry is a miss, never an error.
    #[must_use]
    pub fn load(&self, path: &Path) -> Option<DynamicImage> {
        if !path.is_file() {
            return None;
        }

        let decoded = ImageReader::open(path)
            .map_err(image::ImageError::IoError)
            .and_then(|mut reader| {
                reader.set_format(ImageFormat::Png);
                reader.decode()
            });

        match decoded {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "discarding unreadable thumbnail cache entry"
                );
                None
            }
        }
    }

    /// Encodes `image` as PNG and atomically places it at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket directory cannot be created or the entry
    /// cannot be encoded or written.
    pub fn store(&self, path: &Path, image: &DynamicImage) -> io::Result<()> {
        let bucket = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(bucket)?;

        let mut temp = NamedTempFile::new_in(bucket)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            image.write_to(&mut writer, ImageFormat::Png).map_err(io::Error::other)?;
            writer.flush()?;
        }

        temp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}
