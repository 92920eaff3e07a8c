//! Image file discovery and proportional resizing.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use image::imageops::FilterType;
use natord::compare;

/// Checks if a file has one of the given extensions (case-insensitive).
///
/// `extensions` are expected lowercase and without the leading dot.
pub fn is_supported_image<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
        let ext = ext.to_lowercase();
        extensions.iter().any(|supported| supported.as_ref() == ext)
    })
}

/// Lists the supported image files directly inside `dir`.
///
/// Not recursive. Results are in natural order so `img2` sorts before `img10`.
/// A missing or unreadable directory yields an empty list.
pub fn list_image_files<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut images: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path, extensions))
        .collect();

    images.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
    images
}

/// Lists the immediate subdirectories of `dir` in natural order.
pub fn list_subdirectories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> =
        entries.flatten().map(|entry| entry.path()).filter(|path| path.is_dir()).collect();

    dirs.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
    dirs
}

/// Computes the dimensions of a `width` x `height` image scaled so its larger
/// side equals `max`.
///
/// The smaller side is `floor(max * small / large)`, clamped to at least 1.
/// Square images map to `max` x `max`. Images smaller than `max` are scaled up.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn scaled_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let width = width.max(1);
    let height = height.max(1);
    let max = max.max(1);

    let scale = |small: u32, large: u32| -> u32 {
        let scaled = u64::from(max) * u64::from(small) / u64::from(large);
        (scaled as u32).max(1)
    };

    if width >= height { (max, scale(height, width)) } else { (scale(width, height), max) }
}

/// Resizes `image` so its larger side equals `max`, preserving aspect ratio.
#[must_use]
pub fn resize_to_max(image: &DynamicImage, max: u32) -> DynamicImage {
    let (width, height) = scaled_dimensions(image.width(), image.height(), max);
    image.resize_exact(width, height, FilterType::Lanczos3)
}
