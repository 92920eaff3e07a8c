//! Discovery of the files worth warming for a directory.

use std::path::{Path, PathBuf};

use crate::thumbnail::processing::{list_image_files, list_subdirectories};

/// Returns the images a user browsing `dir` is likely to look at next.
///
/// That is the images directly in `dir`, then those directly in its parent,
/// then those directly in each immediate subdirectory (in natural order). Each
/// group is naturally sorted. Nothing deeper is visited.
pub fn relevant_files<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Vec<PathBuf> {
    let mut files = list_image_files(dir, extensions);

    if let Some(parent) = dir.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        files.extend(list_image_files(parent, extensions));
    }

    for subdir in list_subdirectories(dir) {
        files.extend(list_image_files(&subdir, extensions));
    }

    files
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const EXTENSIONS: &[&str] = &["png"];

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_relevant_files_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let dir = root.join("album");

        touch(&root.join("cover.png"));
        touch(&dir.join("img10.png"));
        touch(&dir.join("img2.png"));
        touch(&dir.join("notes.txt"));
        touch(&dir.join("b").join("b1.png"));
        touch(&dir.join("a").join("a1.png"));
        touch(&dir.join("a").join("deeper").join("skip.png"));

        let files = relevant_files(&dir, EXTENSIONS);

        assert_eq!(files, vec![
            dir.join("img2.png"),
            dir.join("img10.png"),
            root.join("cover.png"),
            dir.join("a").join("a1.png"),
            dir.join("b").join("b1.png"),
        ]);
    }

    #[test]
    fn test_relevant_files_missing_dir_still_lists_parent() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        touch(&temp.path().join("sibling.png"));

        assert_eq!(relevant_files(&missing, EXTENSIONS), vec![temp.path().join("sibling.png")]);
    }
}
