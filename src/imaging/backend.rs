//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the editor needs:
//! decode, read_metadata, and encode. Everything above this layer works on
//! [`DynamicImage`] pixels and [`ImageMetadata`] records and never touches a
//! codec directly.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the
//! `MockBackend` in this module, which records every call.

use super::orientation::Orientation;
use super::params::Quality;
use crate::dates::CanonicalDate;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Metadata error: {0}")]
    Metadata(String),
}

/// Embedded metadata of a source file.
///
/// - `date`: EXIF DateTimeOriginal, time of day dropped
/// - `orientation`: EXIF Orientation as stored in the file
/// - `passthrough`: every other primary-image field, written back unchanged
#[derive(Debug, Clone, Default)]
pub struct ImageMetadata {
    pub date: Option<CanonicalDate>,
    pub orientation: Orientation,
    pub passthrough: Vec<exif::Field>,
}

impl ImageMetadata {
    /// The record to write for a save: this file's passthrough fields with
    /// `date` in place of the one read.
    pub fn with_date(mut self, date: Option<CanonicalDate>) -> Self {
        self.date = date;
        self.orientation = Orientation::Normal;
        self
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode pixels by content, with the stored orientation already applied.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Read embedded EXIF metadata. Files without any yield the default record.
    fn read_metadata(&self, path: &Path) -> Result<ImageMetadata, BackendError>;

    /// Encode pixels as JPEG with `metadata` embedded, orientation normal.
    fn encode(
        &self,
        image: &DynamicImage,
        metadata: &ImageMetadata,
        quality: Quality,
    ) -> Result<Vec<u8>, BackendError>;
}
