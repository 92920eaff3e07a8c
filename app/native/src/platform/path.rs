//! Path utilities for shell-like path expansion.
//!
//! Configuration values such as `cacheDir` may be written as `~/…` or relative
//! to the configuration file; these helpers turn them into usable paths.

use std::path::{Path, PathBuf};

/// Expands a leading tilde to the user's home directory.
///
/// Absolute and relative paths are returned unchanged. Blank input yields an
/// empty `PathBuf`.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expands a tilde and resolves relative results against `base_dir`.
///
/// Used for paths found in a configuration file, which are relative to the
/// directory holding that file.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_blank_is_empty() {
        assert_eq!(expand(""), PathBuf::new());
        assert_eq!(expand("   "), PathBuf::new());
    }

    #[test]
    fn test_expand_keeps_absolute_and_relative() {
        assert_eq!(expand("/var/cache/thumbs"), PathBuf::from("/var/cache/thumbs"));
        assert_eq!(expand("thumbs/cache"), PathBuf::from("thumbs/cache"));
    }

    #[test]
    fn test_expand_tilde() {
        let result = expand("~/.cache/wallgrid");
        assert!(!result.to_string_lossy().starts_with('~'));
        assert!(result.ends_with(".cache/wallgrid"));
    }

    #[test]
    fn test_expand_and_resolve_relative_against_base() {
        let base = PathBuf::from("/etc/wallgrid");
        assert_eq!(
            expand_and_resolve(" cache ", &base),
            PathBuf::from("/etc/wallgrid/cache")
        );
    }

    #[test]
    fn test_expand_and_resolve_absolute_and_empty() {
        let base = PathBuf::from("/etc/wallgrid");
        assert_eq!(expand_and_resolve("/tmp/x", &base), PathBuf::from("/tmp/x"));
        assert_eq!(expand_and_resolve("", &base), PathBuf::new());
    }

    #[test]
    fn test_expand_and_resolve_tilde_ignores_base() {
        let base = PathBuf::from("/etc/wallgrid");
        let result = expand_and_resolve("~/thumbs", &base);
        assert!(!result.starts_with("/etc/wallgrid"));
        assert!(result.ends_with("thumbs"));
    }
}
