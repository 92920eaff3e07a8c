//! Errors returned by the thumbnail cache.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing a thumbnail.
///
/// Only [`ThumbnailCache::get`](super::ThumbnailCache::get) surfaces these to
/// callers; every variant means "no thumbnail available" for that request.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// The source file does not exist, is not a regular file, or its metadata
    /// could not be read.
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The source file exists but could not be decoded as an image.
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The source file could not be read for a reason other than being missing.
    #[error("Failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ThumbnailError {
    /// Returns the source path the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path) | Self::Decode { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_contains_path() {
        let err = ThumbnailError::NotFound(PathBuf::from("/pics/missing.png"));
        assert!(err.to_string().contains("/pics/missing.png"));
        assert_eq!(err.path(), std::path::Path::new("/pics/missing.png"));
    }

    #[test]
    fn test_io_error_exposes_source() {
        let err = ThumbnailError::Io {
            path: PathBuf::from("/pics/locked.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
