//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, BMP) | `image::ImageReader` with content sniffing |
//! | Orientation | [`Orientation::apply`](super::orientation::Orientation::apply) |
//! | EXIF read / write | `kamadak-exif` via [`exif_io`](super::exif_io) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Embed EXIF | `img-parts` APP1 segment |

use super::backend::{BackendError, ImageBackend, ImageMetadata};
use super::exif_io;
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, ignoring the extension.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode to baseline JPEG bytes.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, BackendError> {
    // JPEG has no alpha channel and no 16-bit mode.
    let img = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img.clone(),
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
            DynamicImage::ImageLuma8(img.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    };

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

/// Replace the APP1 EXIF segment of an encoded JPEG.
fn embed_exif(jpeg: Vec<u8>, tiff: Vec<u8>) -> Result<Vec<u8>, BackendError> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(jpeg))
        .map_err(|e| BackendError::Metadata(format!("Failed to parse encoded JPEG: {e}")))?;
    jpeg.set_exif(Some(Bytes::from(tiff)));

    let mut out = Vec::new();
    jpeg.encoder()
        .write_to(&mut out)
        .map_err(BackendError::Io)?;
    Ok(out)
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let img = load_image(path)?;
        let orientation = self.read_metadata(path)?.orientation;
        log::debug!("decoded {} ({orientation:?})", path.display());
        Ok(orientation.apply(img))
    }

    fn read_metadata(&self, path: &Path) -> Result<ImageMetadata, BackendError> {
        let bytes = std::fs::read(path)?;
        match exif_io::parse(&bytes) {
            Ok(metadata) => Ok(metadata),
            Err(exif::Error::NotFound(_)) => Ok(ImageMetadata::default()),
            Err(e) => {
                log::warn!("ignoring unreadable EXIF in {}: {e}", path.display());
                Ok(ImageMetadata::default())
            }
        }
    }

    fn encode(
        &self,
        image: &DynamicImage,
        metadata: &ImageMetadata,
        quality: Quality,
    ) -> Result<Vec<u8>, BackendError> {
        let jpeg = encode_jpeg(image, quality.value())?;
        let tiff = exif_io::serialize(metadata)
            .map_err(|e| BackendError::Metadata(format!("Failed to build EXIF: {e}")))?;
        embed_exif(jpeg, tiff)
    }
}
