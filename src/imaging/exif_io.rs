//! EXIF read and re-serialisation.
//!
//! | Direction | Crate / function |
//! |---|---|
//! | Read (JPEG, TIFF, PNG, WebP containers) | `exif::Reader::read_from_container` |
//! | Write (TIFF structure for the APP1 segment) | `exif::experimental::Writer` |
//!
//! On read, the capture date and orientation are pulled out and every other
//! primary-image field is kept for passthrough, the source's own date tags
//! included. Thumbnail fields, offset pointers, and fields the writer can't
//! serialise are dropped.
//!
//! On write, the passthrough fields are emitted unchanged and orientation is
//! forced to normal. A known date replaces all three date tags at noon;
//! without one, whatever date tags the source had are written back as-is.

use super::backend::ImageMetadata;
use super::orientation::Orientation;
use crate::dates::CanonicalDate;
use exif::{Field, In, Reader, Tag, Value};
use std::io::Cursor;

/// Tags that carry the capture date.
const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Tags rebuilt on write or meaningless once the pixels are re-encoded.
const REBUILT_TAGS: &[Tag] = &[
    Tag::Orientation,
    Tag::ExifIFDPointer,
    Tag::GPSInfoIFDPointer,
    Tag::InteropIFDPointer,
    Tag::StripOffsets,
    Tag::StripByteCounts,
    Tag::TileOffsets,
    Tag::TileByteCounts,
    Tag::JPEGInterchangeFormat,
    Tag::JPEGInterchangeFormatLength,
];

/// Parse EXIF from a whole image file.
pub fn parse(bytes: &[u8]) -> Result<ImageMetadata, exif::Error> {
    let exif = Reader::new().read_from_container(&mut Cursor::new(bytes))?;

    let date = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .and_then(ascii_value)
        .and_then(CanonicalDate::from_exif);

    let orientation = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .map(Orientation::from_exif)
        .unwrap_or_default();

    let passthrough = exif.fields().filter(|f| is_carried(f)).cloned().collect();

    Ok(ImageMetadata {
        date,
        orientation,
        passthrough,
    })
}

/// Serialise `metadata` as a big-endian TIFF structure (no `Exif\0\0` prefix).
///
/// The stored orientation is ignored: the output is always upright.
pub fn serialize(metadata: &ImageMetadata) -> Result<Vec<u8>, exif::Error> {
    let mut fields: Vec<Field> = metadata
        .passthrough
        .iter()
        .filter(|f| is_carried(f))
        .filter(|f| metadata.date.is_none() || !DATE_TAGS.contains(&f.tag))
        .cloned()
        .collect();

    fields.push(Field {
        tag: Tag::Orientation,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![Orientation::Normal.to_exif()]),
    });
    if let Some(date) = metadata.date {
        let stamp = date.to_exif_datetime().into_bytes();
        for tag in DATE_TAGS {
            fields.push(Field {
                tag,
                ifd_num: In::PRIMARY,
                value: Value::Ascii(vec![stamp.clone()]),
            });
        }
    }

    let mut writer = exif::experimental::Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false)?;
    Ok(buf.into_inner())
}

fn ascii_value(field: &Field) -> Option<&str> {
    match &field.value {
        Value::Ascii(parts) => parts.first().and_then(|s| std::str::from_utf8(s).ok()),
        _ => None,
    }
}

fn is_carried(field: &Field) -> bool {
    field.ifd_num == In::PRIMARY
        && !REBUILT_TAGS.contains(&field.tag)
        && !matches!(field.value, Value::Unknown(..))
}
