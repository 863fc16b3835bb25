//! Shared test utilities for the photo-review test suite.
//!
//! Provides synthetic image fixtures and small readers for checking what a
//! save wrote to disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (_tmp, folder) = review_folder("trip");
//! create_test_jpeg(&folder.join("scan_0001.jpg"), 100, 100);
//! // ... edit and save ...
//! assert_eq!(read_exif_date(&saved).as_deref(), Some("2005:03:04 12:00:00"));
//! ```

use image::{ImageEncoder, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// A temp dir holding an empty folder called `name`.
///
/// Saved files take their folder's name, so tests get a predictable one
/// instead of the random temp dir name.
pub fn review_folder(name: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let folder = tmp.path().join(name);
    std::fs::create_dir(&folder).unwrap();
    let folder = std::fs::canonicalize(folder).unwrap();
    (tmp, folder)
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

// =========================================================================
// Output inspection
// =========================================================================

/// DateTimeOriginal as stored, e.g. `"2005:03:04 12:00:00"`.
pub fn read_exif_date(path: &Path) -> Option<String> {
    read_exif_ascii(path, exif::Tag::DateTimeOriginal)
}

/// Raw EXIF orientation value, if the tag is present.
pub fn read_exif_orientation(path: &Path) -> Option<u32> {
    let exif = read_exif(path)?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
}

fn read_exif_ascii(path: &Path, tag: exif::Tag) -> Option<String> {
    let exif = read_exif(path)?;
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    match &field.value {
        exif::Value::Ascii(parts) => parts
            .first()
            .map(|s| String::from_utf8_lossy(s).into_owned()),
        _ => None,
    }
}

fn read_exif(path: &Path) -> Option<exif::Exif> {
    let file = std::fs::File::open(path).ok()?;
    let mut reader = std::io::BufReader::new(file);
    exif::Reader::new().read_from_container(&mut reader).ok()
}

/// File names in `folder`, sorted.
pub fn file_names(folder: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(folder)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
