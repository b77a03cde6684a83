//! Pure Rust codec backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader` with content sniffing |
//! | Layout capture | `DynamicImage::color` + `DynamicImage::as_bytes` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//!
//! Decoded pixels are copied into the record verbatim, so the report shows
//! each file's native layout. Color types without a [`PixelFormat`] of their
//! own are converted to RGBA8 at decode time.

use super::backend::{BackendError, ImageBackend};
use super::normalize::{normalize, packed_rows};
use crate::raster::{PixelFormat, RasterRecord};
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
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

/// Record layout for a decoder color type, if we track it natively.
fn pixel_format_of(color: ColorType) -> Option<PixelFormat> {
    match color {
        ColorType::L8 => Some(PixelFormat::L8),
        ColorType::La8 => Some(PixelFormat::La8),
        ColorType::Rgb8 => Some(PixelFormat::Rgb8),
        ColorType::Rgba8 => Some(PixelFormat::Rgba8),
        ColorType::L16 => Some(PixelFormat::L16),
        ColorType::La16 => Some(PixelFormat::La16),
        ColorType::Rgb16 => Some(PixelFormat::Rgb16),
        ColorType::Rgba16 => Some(PixelFormat::Rgba16),
        ColorType::Rgb32F => Some(PixelFormat::Rgb32F),
        ColorType::Rgba32F => Some(PixelFormat::Rgba32F),
        _ => None,
    }
}

/// PNG color type for a record layout. Float layouts have none.
fn png_color_type(format: PixelFormat) -> Option<ExtendedColorType> {
    match format {
        PixelFormat::L8 => Some(ExtendedColorType::L8),
        PixelFormat::La8 => Some(ExtendedColorType::La8),
        PixelFormat::Rgb8 => Some(ExtendedColorType::Rgb8),
        PixelFormat::Rgba8 => Some(ExtendedColorType::Rgba8),
        PixelFormat::L16 => Some(ExtendedColorType::L16),
        PixelFormat::La16 => Some(ExtendedColorType::La16),
        PixelFormat::Rgb16 => Some(ExtendedColorType::Rgb16),
        PixelFormat::Rgba16 => Some(ExtendedColorType::Rgba16),
        PixelFormat::Rgb32F | PixelFormat::Rgba32F => None,
    }
}

/// Load and decode an image from disk, sniffing the format from its bytes.
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

/// Capture a decoded image as a record in its native layout.
fn into_record(path: &Path, img: DynamicImage) -> Result<RasterRecord, BackendError> {
    let (width, height) = (img.width(), img.height());
    let (format, pixels) = match pixel_format_of(img.color()) {
        Some(format) => (format, img.as_bytes().to_vec()),
        None => (PixelFormat::Rgba8, img.into_rgba8().into_raw()),
    };
    RasterRecord::packed(path, pixels, width, height, format)
        .map_err(|e| BackendError::ProcessingFailed(format!("{}: {e}", path.display())))
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<RasterRecord, BackendError> {
        let img = load_image(path)?;
        into_record(path, img)
    }

    fn write_png(&self, record: &RasterRecord, output: &Path) -> Result<(), BackendError> {
        // The PNG encoder takes integer samples only; floats go out as RGBA8.
        let converted;
        let record = match png_color_type(record.format()) {
            Some(_) => record,
            None => {
                converted = normalize(record.clone()).map_err(|e| {
                    BackendError::ProcessingFailed(format!("{}: {e}", output.display()))
                })?;
                &converted
            }
        };
        let color = png_color_type(record.format()).unwrap_or(ExtendedColorType::Rgba8);

        let rows = packed_rows(record);
        let expected = record.width() as usize
            * record.height() as usize
            * record.format().bytes_per_pixel();
        if rows.len() != expected {
            return Err(BackendError::ProcessingFailed(format!(
                "{}: pixel buffer holds {} bytes, expected {}",
                output.display(),
                rows.len(),
                expected
            )));
        }

        let file = std::fs::File::create(output).map_err(BackendError::Io)?;
        let writer = std::io::BufWriter::new(file);
        PngEncoder::new(writer)
            .write_image(&rows, record.width(), record.height(), color)
            .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))
    }
}
