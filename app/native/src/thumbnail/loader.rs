//! Decoding of original source images.
//!
//! [`ThumbnailCache`](super::ThumbnailCache) only reaches for an original file
//! on a full miss. The loader is a trait so tests can count or slow down those
//! decodes without touching the filesystem layout.

use std::io::ErrorKind;
use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};

use super::error::ThumbnailError;

/// Decodes an original image file.
pub trait ImageLoader: Send + Sync {
    /// Loads and decodes the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbnailError::NotFound`] if the file vanished,
    /// [`ThumbnailError::Decode`] if its contents are not a decodable image, and
    /// [`ThumbnailError::Io`] for other read failures.
    fn load(&self, path: &Path) -> Result<DynamicImage, ThumbnailError>;
}

/// Loads images from disk with the `image` crate, guessing the format from the
/// file contents rather than trusting the extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage, ThumbnailError> {
        let reader = ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|source| io_error(path, source))?;

        reader.decode().map_err(|source| match source {
            ImageError::IoError(source) => io_error(path, source),
            source => ThumbnailError::Decode { path: path.to_path_buf(), source },
        })
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ThumbnailError {
    if source.kind() == ErrorKind::NotFound {
        ThumbnailError::NotFound(path.to_path_buf())
    } else {
        ThumbnailError::Io { path: path.to_path_buf(), source }
    }
}
