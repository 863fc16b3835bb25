//! Image decoding, encoding, and EXIF handling.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content-sniffed) + EXIF orientation |
//! | **EXIF metadata** | `kamadak-exif` reader and experimental writer |
//! | **Encode → JPEG** | `JpegEncoder` + `img-parts` to splice in the EXIF segment |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`], [`RotateDirection`]
//! - **Orientation**: the EXIF orientation flag and how to bake it into pixels
//! - **EXIF I/O**: date/orientation extraction and passthrough re-serialisation
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod exif_io;
mod orientation;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, ImageMetadata};
pub use orientation::Orientation;
pub use params::{Quality, RotateDirection};
pub use rust_backend::RustBackend;
