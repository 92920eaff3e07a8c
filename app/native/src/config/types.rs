//! Configuration types for Wallgrid.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! Every field is optional; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::get_cache_dir;
use crate::constants::{
    APP_ID, DEFAULT_MEMORY_ENTRIES, DEFAULT_POLL_INTERVAL_MS, DEFAULT_THUMBNAIL_SIZE,
    SUPPORTED_EXTENSIONS, THUMBNAILS_SUBDIR,
};
use crate::platform::path::{expand, expand_and_resolve};
use crate::thumbnail::ThumbnailSize;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallgridConfig {
    /// Thumbnail cache settings.
    pub thumbnails: ThumbnailConfig,

    /// Background prefetch settings.
    pub prefetch: PrefetchConfig,
}

/// Thumbnail cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThumbnailConfig {
    /// Cache root directory. Thumbnails are stored under `{cacheDir}/thumbnails`.
    /// Supports `~`; relative paths are resolved against the configuration file.
    /// Empty means the platform cache directory.
    pub cache_dir: String,

    /// Maximum number of decoded images kept in memory, across all sizes.
    pub memory_entries: usize,

    /// Thumbnail max dimension used when a command does not specify one.
    pub default_size: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            cache_dir: String::new(),
            memory_entries: DEFAULT_MEMORY_ENTRIES,
            default_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl ThumbnailConfig {
    /// Returns the cache root, falling back to the platform cache directory.
    #[must_use]
    pub fn cache_root(&self) -> PathBuf {
        let expanded = expand(&self.cache_dir);
        if expanded.as_os_str().is_empty() { get_cache_dir() } else { expanded }
    }

    /// Returns the root of the on-disk thumbnail layer.
    #[must_use]
    pub fn thumbnail_root(&self) -> PathBuf { self.cache_root().join(THUMBNAILS_SUBDIR) }

    /// Returns the configured default size. Zero falls back to the built-in default.
    #[must_use]
    pub fn default_thumbnail_size(&self) -> ThumbnailSize {
        ThumbnailSize::max(self.default_size)
            .or(ThumbnailSize::max(DEFAULT_THUMBNAIL_SIZE))
            .unwrap_or(ThumbnailSize::Original)
    }
}

/// Background prefetch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrefetchConfig {
    /// How long the worker sleeps between checks once a pass is complete.
    pub poll_interval_ms: u64,

    /// File extensions treated as images (case-insensitive, without the dot).
    pub extensions: Vec<String>,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            extensions: SUPPORTED_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PrefetchConfig {
    /// Returns the idle polling interval. Zero falls back to the built-in default.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        if self.poll_interval_ms == 0 {
            return Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
        }
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/{APP_ID}/config.jsonc \
                or config.json"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/wallgrid/`, if the variable is set
/// 2. `~/.config/wallgrid/`
/// 3. The platform configuration directory (`~/Library/Application Support/wallgrid/` on macOS)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        dirs_to_check.push(PathBuf::from(xdg_config).join(APP_ID));
    }

    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".config").join(APP_ID));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join(APP_ID));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_check {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any expected location.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(WallgridConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from a specific file.
///
/// A relative `thumbnails.cacheDir` is resolved against the file's directory.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist.
/// Returns `ConfigError::IoError` if the file could not be read.
/// Returns `ConfigError::ParseError` if the file contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<(WallgridConfig, PathBuf), ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let mut config: WallgridConfig = serde_json::from_reader(reader)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let cache_dir = expand_and_resolve(&config.thumbnails.cache_dir, base_dir);
    config.thumbnails.cache_dir = cache_dir.to_string_lossy().into_owned();

    Ok((config, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = WallgridConfig::default();
        assert!(config.thumbnails.cache_dir.is_empty());
        assert_eq!(config.thumbnails.memory_entries, 2000);
        assert_eq!(config.thumbnails.default_size, 192);
        assert_eq!(config.prefetch.poll_interval(), Duration::from_secs(2));
        assert!(config.prefetch.extensions.iter().any(|ext| ext == "png"));
    }

    #[test]
    fn test_config_deserializes_partial_sections() {
        let json = r#"{ "thumbnails": { "memoryEntries": 10 } }"#;

        let config: WallgridConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.thumbnails.memory_entries, 10);
        assert_eq!(config.thumbnails.default_size, 192);
        assert_eq!(config.prefetch, PrefetchConfig::default());
    }

    #[test]
    fn test_empty_cache_dir_uses_platform_cache() {
        let config = ThumbnailConfig::default();
        assert_eq!(config.cache_root(), get_cache_dir());
        assert_eq!(config.thumbnail_root(), get_cache_dir().join(THUMBNAILS_SUBDIR));
    }

    #[test]
    fn test_zero_default_size_falls_back() {
        let config = ThumbnailConfig { default_size: 0, ..Default::default() };
        assert_eq!(config.default_thumbnail_size(), ThumbnailSize::max(192).unwrap());
    }

    #[test]
    fn test_zero_poll_interval_falls_back() {
        let json = r#"{ "prefetch": { "pollIntervalMs": 0 } }"#;

        let config: WallgridConfig = serde_json::from_str(json).unwrap();
        let expected = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.prefetch.poll_interval(), expected);
        assert!(!config.prefetch.poll_interval().is_zero());
    }

    #[test]
    fn test_load_config_from_path_strips_comments() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.jsonc");
        fs::write(
            &path,
            r#"{
                // where thumbnails go
                "thumbnails": { "cacheDir": "cache", "defaultSize": 64 },
                /* poll quickly */
                "prefetch": { "pollIntervalMs": 50, "extensions": ["png"] }
            }"#,
        )
        .unwrap();

        let (config, loaded_from) = load_config_from_path(&path).unwrap();

        assert_eq!(loaded_from, path);
        assert_eq!(config.thumbnails.default_size, 64);
        assert_eq!(config.thumbnails.cache_root(), temp.path().join("cache"));
        assert_eq!(config.prefetch.poll_interval(), Duration::from_millis(50));
        assert_eq!(config.prefetch.extensions, vec!["png".to_string()]);
    }

    #[test]
    fn test_load_config_from_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config_from_path(&temp.path().join("missing.jsonc"));
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_load_config_from_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let result = load_config_from_path(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_paths_prefer_jsonc() {
        let paths = config_paths();
        if let Some(first) = paths.first() {
            assert!(first.ends_with("config.jsonc"));
        }
    }

    #[test]
    fn test_config_error_message() {
        let msg = ConfigError::NotFound.to_string();
        assert!(msg.contains("No configuration file found"));
    }
}
