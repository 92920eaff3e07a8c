//! End-to-end behavior of the thumbnail cache through its public API.

mod common;

use std::fs;
use std::sync::Arc;

use common::{TestLoader, cache_with, write_png};
use tempfile::TempDir;
use wallgrid_lib::thumbnail::derive_key;
use wallgrid_lib::{CacheOptions, ThumbnailCache, ThumbnailSize};

fn size(pixels: u32) -> ThumbnailSize { ThumbnailSize::max(pixels).unwrap() }

#[test]
fn test_gallery_thumbnails_land_in_size_bucket() {
    let temp = TempDir::new().unwrap();
    let pics = temp.path().join("pics");
    let root = temp.path().join("thumbnails");
    let a = write_png(&pics, "a.png", 500, 300);
    let b = write_png(&pics, "b.png", 300, 300);

    let cache = ThumbnailCache::new(CacheOptions::new(&root));

    let thumb_a = cache.get(&a, size(100)).unwrap();
    let thumb_b = cache.get(&b, size(100)).unwrap();
    assert_eq!((thumb_a.width(), thumb_a.height()), (100, 60));
    assert_eq!((thumb_b.width(), thumb_b.height()), (100, 100));

    let mut stored: Vec<String> = fs::read_dir(root.join("100"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    stored.sort();

    let mut expected: Vec<String> = [&a, &b]
        .iter()
        .map(|path| format!("{}.png", cache.key_for(path, size(100)).unwrap()))
        .collect();
    expected.sort();

    assert_eq!(stored, expected);
}

#[test]
fn test_keys_are_stable_and_distinct() {
    let temp = TempDir::new().unwrap();
    let a = write_png(temp.path(), "a.png", 10, 10);
    let b = write_png(temp.path(), "b.png", 10, 10);
    let cache = ThumbnailCache::new(CacheOptions::new(temp.path().join("thumbs")));

    let first = cache.key_for(&a, size(100)).unwrap();
    assert_eq!(first, cache.key_for(&a, size(100)).unwrap());
    assert_eq!(first.as_str().len(), 64);
    assert_ne!(first, cache.key_for(&a, size(200)).unwrap());
    assert_ne!(first, cache.key_for(&a, ThumbnailSize::Original).unwrap());
    assert_ne!(first, cache.key_for(&b, size(100)).unwrap());

    let mtime = fs::metadata(&a).unwrap().modified().unwrap();
    assert_eq!(derive_key(&a, size(100), mtime), first);
}

#[test]
fn test_fresh_cache_reuses_disk_entries() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("thumbs");
    let a = write_png(&temp.path().join("pics"), "a.png", 64, 32);

    let first_loader = Arc::new(TestLoader::default());
    cache_with(&root, &first_loader).get(&a, size(16)).unwrap();
    assert_eq!(first_loader.loads(), 1);

    // A new process: empty memory, same disk.
    let second_loader = Arc::new(TestLoader::default());
    let image = cache_with(&root, &second_loader).get(&a, size(16)).unwrap();

    assert_eq!(second_loader.loads(), 0);
    assert_eq!((image.width(), image.height()), (16, 8));
}

#[test]
fn test_concurrent_gets_agree() {
    let temp = TempDir::new().unwrap();
    let a = write_png(&temp.path().join("pics"), "a.png", 90, 30);
    let loader = Arc::new(TestLoader::default());
    let cache = cache_with(&temp.path().join("thumbs"), &loader);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let path = a.clone();
            std::thread::spawn(move || {
                let image = cache.get(&path, size(30)).unwrap();
                (image.width(), image.height())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (30, 10));
    }
    assert_eq!(cache.memory_len(), 1);
}
