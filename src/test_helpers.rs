//! Shared test utilities for the ibp test suite.
//!
//! Builds synthetic sprites in memory or on disk so tests never depend on
//! checked-in binary fixtures.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let record = bordered_record("hero.png", 12, 9, 2);
//! assert_eq!(record.pixel_bytes(2, 2).unwrap(), interior_color(2, 2).as_slice());
//! ```

use crate::raster::{ALPHA_OPAQUE, ALPHA_TRANSPARENT, PixelFormat, RasterRecord};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Colour of a border pixel: visible RGB, fully transparent.
pub const BORDER_COLOR: [u8; 4] = [9, 9, 9, ALPHA_TRANSPARENT];

// =========================================================================
// Pixel builders
// =========================================================================

/// Opaque colour that encodes its own coordinates, so crops can be checked.
pub fn interior_color(x: u32, y: u32) -> [u8; 4] {
    [(x * 10 % 256) as u8, (y * 10 % 256) as u8, 200, ALPHA_OPAQUE]
}

/// `width`×`height` RGBA image with a transparent border `border` pixels wide.
pub fn bordered_rgba(width: u32, height: u32, border: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= border && y >= border && x + border < width && y + border < height;
        if inside {
            Rgba(interior_color(x, y))
        } else {
            Rgba(BORDER_COLOR)
        }
    })
}

// =========================================================================
// Record builders
// =========================================================================

/// Canonical record wrapping [`bordered_rgba`].
pub fn bordered_record(path: &str, width: u32, height: u32, border: u32) -> RasterRecord {
    let img = bordered_rgba(width, height, border);
    RasterRecord::packed(path, img.into_raw(), width, height, PixelFormat::Rgba8).unwrap()
}

/// Canonical record whose alpha channel is given row by row.
pub fn alpha_grid(path: &str, rows: &[&[u8]]) -> RasterRecord {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let pixels = rows
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter().enumerate().flat_map(move |(x, &alpha)| {
                let [r, g, b, _] = interior_color(x as u32, y as u32);
                [r, g, b, alpha]
            })
        })
        .collect();
    RasterRecord::packed(path, pixels, width, height, PixelFormat::Rgba8).unwrap()
}

/// Canonical record of a solid opaque `width`×`height` block.
pub fn solid_record(path: &str, width: u32, height: u32) -> RasterRecord {
    bordered_record(path, width, height, 0)
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Encode `img` as PNG at `path`.
pub fn write_png(path: &Path, img: &RgbaImage) {
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write a bordered sprite into `dir` and return its path.
pub fn write_bordered_png(dir: &Path, name: &str, width: u32, height: u32, border: u32) -> PathBuf {
    let path = dir.join(name);
    write_png(&path, &bordered_rgba(width, height, border));
    path
}
