//! Alpha bounding-box analysis.
//!
//! Scans a canonical RGBA8 record and finds the smallest rectangle holding
//! every pixel whose alpha is significant. The scan keeps running extrema
//! seeded "inside out" (`left = width`, `right = 0`, `top = height`,
//! `bottom = 0`) and moves them only for significant pixels. `right` and
//! `bottom` are exclusive, so `width = right - left` is the column count.
//!
//! An image with no significant pixel never moves the extrema; that case is
//! reported as [`AlphaBounds::NoneSignificant`] rather than as an inverted
//! rectangle.

use crate::raster::{ALPHA_TRANSPARENT, RasterError, RasterRecord, Rect};

/// Outcome of a bounding-box scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaBounds {
    /// Minimal rectangle enclosing all significant pixels.
    Found(Rect),
    /// No pixel's alpha exceeded the threshold.
    NoneSignificant,
}

/// Distance of an alpha value from fully transparent.
pub fn significance(alpha: u8) -> u8 {
    (i16::from(alpha) - i16::from(ALPHA_TRANSPARENT)).unsigned_abs() as u8
}

/// Compute the bounding box of pixels with `significance(alpha) > threshold`.
///
/// The record must be in canonical format; normalize it first. Every pixel
/// inside `width`×`height` must be readable: a buffer that falls short is an
/// error, never a partial scan.
pub fn alpha_bounds(record: &RasterRecord, threshold: u8) -> Result<AlphaBounds, RasterError> {
    if !record.format().is_canonical() {
        return Err(RasterError::NotCanonical(record.format()));
    }

    let (width, height) = (record.width(), record.height());
    let (mut left, mut right, mut top, mut bottom) = (width, 0u32, height, 0u32);

    for y in 0..height {
        for x in 0..width {
            let alpha = record
                .alpha_at(x, y)
                .ok_or(RasterError::Unreadable { x, y })?;
            if significance(alpha) > threshold {
                left = left.min(x);
                right = right.max(x + 1);
                top = top.min(y);
                bottom = bottom.max(y + 1);
            }
        }
    }

    if right <= left || bottom <= top {
        return Ok(AlphaBounds::NoneSignificant);
    }
    Ok(AlphaBounds::Found(Rect::new(
        left,
        top,
        right - left,
        bottom - top,
    )))
}
