//! Rectangle crop of a canonical RGBA8 record.
//!
//! `image::imageops::crop_imm` clamps out-of-range rectangles silently; we
//! check the rectangle first and refuse it instead, so a bad rectangle
//! surfaces as an error rather than as a smaller image.

use super::normalize::packed_rows;
use crate::raster::{PixelFormat, RasterError, RasterRecord, Rect};
use image::RgbaImage;

/// Cut `rect` out of `record`, returning a record that owns only those pixels.
pub fn crop(mut record: RasterRecord, rect: Rect) -> Result<RasterRecord, RasterError> {
    if !record.format().is_canonical() {
        return Err(RasterError::NotCanonical(record.format()));
    }
    if rect.is_empty() {
        return Err(RasterError::EmptyRect(rect));
    }
    let (width, height) = (record.width(), record.height());
    if !rect.fits_within(width, height) {
        return Err(RasterError::RectOutOfBounds {
            rect,
            width,
            height,
        });
    }

    let rows = if record.stride() == width as usize * 4 {
        record.take_pixels()
    } else {
        packed_rows(&record).into_owned()
    };
    let actual = rows.len();
    let image = RgbaImage::from_raw(width, height, rows).ok_or(RasterError::BufferSize {
        expected: width as usize * height as usize * 4,
        actual,
        stride: record.stride(),
        height,
    })?;
    let cropped =
        image::imageops::crop_imm(&image, rect.left, rect.top, rect.width, rect.height).to_image();

    record.replace_pixels(cropped.into_raw(), rect.width, rect.height, PixelFormat::CANONICAL)
}
