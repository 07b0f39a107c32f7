//! Shared test utilities for the image-tool test suite.
//!
//! Fixture images are generated on the fly with the `image` crate, so tests
//! never depend on files checked into the repository.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let red = create_solid_png(tmp.path(), "red.png", 10, 10, [255, 0, 0]);
//! assert_eq!(read_dimensions(&red), (10, 10));
//! ```

use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Fixture creation
// =========================================================================

/// Write an RGB PNG whose pixels all differ, so flips and crops are visible.
pub fn create_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 13 % 256) as u8, (y * 29 % 256) as u8, ((x + y) * 7 % 256) as u8])
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

/// Write a single-colour RGB PNG.
pub fn create_solid_png(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let img = RgbImage::from_pixel(width, height, Rgb(rgb));
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

/// Write a file that no decoder accepts.
pub fn create_text_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "This is not an image file.").unwrap();
    path
}

// =========================================================================
// Inspection
// =========================================================================

/// Decode an image and return `(width, height)`. Panics if it does not decode.
pub fn read_dimensions(path: &Path) -> (u32, u32) {
    let img = read_rgb(path);
    (img.width(), img.height())
}

/// Decode an image into RGB8 pixels. Panics if it does not decode.
pub fn read_rgb(path: &Path) -> RgbImage {
    image::open(path)
        .unwrap_or_else(|e| panic!("failed to decode {}: {e}", path.display()))
        .to_rgb8()
}

/// Sorted file names in a directory.
pub fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
