//! Conversion of any decoded layout into canonical RGBA8.
//!
//! The heavy lifting is the `image` crate's own color conversion
//! (`DynamicImage::to_rgba8`): we only rebuild a typed buffer from the
//! record's raw bytes and hand the converted bytes back to a new record.

use crate::raster::{PixelFormat, RasterError, RasterRecord};
use image::{DynamicImage, ImageBuffer, Luma, LumaA, Rgb, Rgba};
use std::borrow::Cow;

/// Convert a record into [`PixelFormat::CANONICAL`].
///
/// A record that is already RGBA8 with packed rows is returned untouched.
/// Anything else gets a fresh buffer; the old one is dropped.
pub fn normalize(record: RasterRecord) -> Result<RasterRecord, RasterError> {
    let format = record.format();
    let (width, height) = (record.width(), record.height());

    if format.is_canonical() {
        if record.stride() == width as usize * 4 {
            return Ok(record);
        }
        let rows = packed_rows(&record).into_owned();
        return record.replace_pixels(rows, width, height, format);
    }

    let rgba = to_dynamic(format, width, height, &packed_rows(&record))
        .ok_or(RasterError::Conversion { format })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    record.replace_pixels(rgba.into_raw(), width, height, PixelFormat::CANONICAL)
}

/// Pixel rows with any stride padding removed.
pub(crate) fn packed_rows(record: &RasterRecord) -> Cow<'_, [u8]> {
    let row_bytes = record.width() as usize * record.format().bytes_per_pixel();
    if record.stride() == row_bytes {
        return Cow::Borrowed(record.pixels());
    }
    let rows = record
        .pixels()
        .chunks(record.stride().max(1))
        .take(record.height() as usize)
        .flat_map(|row| &row[..row_bytes.min(row.len())])
        .copied()
        .collect();
    Cow::Owned(rows)
}

/// Rebuild a typed image from packed native-endian bytes.
fn to_dynamic(format: PixelFormat, width: u32, height: u32, bytes: &[u8]) -> Option<DynamicImage> {
    match format {
        PixelFormat::L8 => ImageBuffer::<Luma<u8>, _>::from_raw(width, height, bytes.to_vec())
            .map(DynamicImage::ImageLuma8),
        PixelFormat::La8 => ImageBuffer::<LumaA<u8>, _>::from_raw(width, height, bytes.to_vec())
            .map(DynamicImage::ImageLumaA8),
        PixelFormat::Rgb8 => ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, bytes.to_vec())
            .map(DynamicImage::ImageRgb8),
        PixelFormat::Rgba8 => ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, bytes.to_vec())
            .map(DynamicImage::ImageRgba8),
        PixelFormat::L16 => ImageBuffer::<Luma<u16>, _>::from_raw(width, height, u16s(bytes))
            .map(DynamicImage::ImageLuma16),
        PixelFormat::La16 => ImageBuffer::<LumaA<u16>, _>::from_raw(width, height, u16s(bytes))
            .map(DynamicImage::ImageLumaA16),
        PixelFormat::Rgb16 => ImageBuffer::<Rgb<u16>, _>::from_raw(width, height, u16s(bytes))
            .map(DynamicImage::ImageRgb16),
        PixelFormat::Rgba16 => ImageBuffer::<Rgba<u16>, _>::from_raw(width, height, u16s(bytes))
            .map(DynamicImage::ImageRgba16),
        PixelFormat::Rgb32F => ImageBuffer::<Rgb<f32>, _>::from_raw(width, height, f32s(bytes))
            .map(DynamicImage::ImageRgb32F),
        PixelFormat::Rgba32F => ImageBuffer::<Rgba<f32>, _>::from_raw(width, height, f32s(bytes))
            .map(DynamicImage::ImageRgba32F),
    }
}

fn u16s(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

fn f32s(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
