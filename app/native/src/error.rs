//! Error types for the Wallgrid command-line host.
//!
//! The library reports failures through per-layer enums
//! ([`ThumbnailError`], [`PrefetchError`], [`ConfigError`]); this module folds
//! them into one type for the binary.

use thiserror::Error;

use crate::config::ConfigError;
use crate::prefetch::PrefetchError;
use crate::thumbnail::ThumbnailError;

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum WallgridError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// A thumbnail could not be produced.
    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),
    /// The prefetch worker could not be started.
    #[error("Prefetch error: {0}")]
    Prefetch(#[from] PrefetchError),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// An image could not be encoded or saved.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<ConfigError> for WallgridError {
    fn from(err: ConfigError) -> Self { Self::Config(err.to_string()) }
}
