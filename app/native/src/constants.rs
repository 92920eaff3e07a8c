//! Application-wide constants.

/// Application identifier used for cache and configuration directory names.
pub const APP_ID: &str = "wallgrid";

/// Name of the subdirectory under the cache root that holds on-disk thumbnails.
pub const THUMBNAILS_SUBDIR: &str = "thumbnails";

/// Default number of decoded images kept in the in-memory LRU.
pub const DEFAULT_MEMORY_ENTRIES: usize = 2000;

/// Default thumbnail max dimension in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 192;

/// Default idle polling interval of the prefetch worker, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Image file extensions the gallery considers by default (lowercase, no dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "ico", "ppm", "pbm", "pgm", "tga",
];

/// Environment variable holding a `tracing` filter directive for the CLI.
pub const LOG_ENV_VAR: &str = "WALLGRID_LOG";
