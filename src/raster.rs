//! In-memory raster records and the geometry they are cut with.
//!
//! A [`RasterRecord`] owns exactly one pixel buffer. Stages that change pixel
//! content (normalization, cropping) consume the record and hand back a new
//! one, so a stale buffer can never be observed through an old handle.
//!
//! ## Canonical layout
//!
//! Every stage after normalization works on [`PixelFormat::Rgba8`]: four
//! 8-bit channels stored in memory as `R, G, B, A`. Read as a little-endian
//! `u32` word the channels sit at
//!
//! | Channel | Mask | Shift |
//! |---|---|---|
//! | red | `0x0000_00FF` | 0 |
//! | green | `0x0000_FF00` | 8 |
//! | blue | `0x00FF_0000` | 16 |
//! | alpha | `0xFF00_0000` | 24 |
//!
//! Row stride is always `width * 4` in this layout.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Alpha value of a fully transparent pixel.
pub const ALPHA_TRANSPARENT: u8 = 0;

/// Alpha value of a fully opaque pixel.
pub const ALPHA_OPAQUE: u8 = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("buffer holds {actual} bytes, expected {expected} (stride {stride} × height {height})")]
    BufferSize {
        expected: usize,
        actual: usize,
        stride: usize,
        height: u32,
    },
    #[error("pixel format {0} is not RGBA8")]
    NotCanonical(PixelFormat),
    #[error("crop rectangle {0} has no area")]
    EmptyRect(Rect),
    #[error("crop rectangle {rect} exceeds {width}x{height} image")]
    RectOutOfBounds { rect: Rect, width: u32, height: u32 },
    #[error("cannot convert {format} buffer to RGBA8")]
    Conversion { format: PixelFormat },
    #[error("row stride {stride} is shorter than a {row_bytes}-byte row")]
    StrideTooShort { stride: usize, row_bytes: usize },
    #[error("{width}x{height} {format} image is too large to address")]
    TooLarge {
        width: u32,
        height: u32,
        format: PixelFormat,
    },
    #[error("pixel ({x}, {y}) lies outside the pixel buffer")]
    Unreadable { x: u32, y: u32 },
}

/// Channel layout of a pixel buffer, one variant per decoder color type.
///
/// Multi-byte samples (16-bit, 32-bit float) are stored in native endianness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    L8,
    La8,
    Rgb8,
    Rgba8,
    L16,
    La16,
    Rgb16,
    Rgba16,
    Rgb32F,
    Rgba32F,
}

impl PixelFormat {
    /// The layout every record is normalized into before analysis.
    pub const CANONICAL: PixelFormat = PixelFormat::Rgba8;

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::L8 => 1,
            Self::La8 | Self::L16 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 | Self::La16 => 4,
            Self::Rgb16 => 6,
            Self::Rgba16 => 8,
            Self::Rgb32F => 12,
            Self::Rgba32F => 16,
        }
    }

    /// Short display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::L8 => "L8",
            Self::La8 => "LA8",
            Self::Rgb8 => "RGB8",
            Self::Rgba8 => "RGBA8",
            Self::L16 => "L16",
            Self::La16 => "LA16",
            Self::Rgb16 => "RGB16",
            Self::Rgba16 => "RGBA16",
            Self::Rgb32F => "RGB32F",
            Self::Rgba32F => "RGBA32F",
        }
    }

    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }

    /// Alpha `(mask, shift)` within a little-endian pixel word.
    ///
    /// Only defined for the canonical layout; other formats are normalized
    /// before anything looks at their alpha.
    pub fn alpha_mask_shift(self) -> Option<(u32, u32)> {
        match self {
            Self::Rgba8 => Some((0xFF00_0000, 24)),
            _ => None,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned pixel rectangle. `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> u64 {
        u64::from(self.left) + u64::from(self.width)
    }

    pub fn bottom(&self) -> u64 {
        u64::from(self.top) + u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies within a `width`×`height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= u64::from(width) && self.bottom() <= u64::from(height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Bytes in one unpadded row, or `None` if that overflows `usize`.
fn row_bytes(width: u32, format: PixelFormat) -> Option<usize> {
    (width as usize).checked_mul(format.bytes_per_pixel())
}

/// One decoded image and everything the report needs to know about it.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRecord {
    source_path: PathBuf,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    exported_to: Option<PathBuf>,
}

impl RasterRecord {
    /// Build a record, checking that every row fits its stride and that
    /// `pixels.len() == stride * height`.
    pub fn new(
        source_path: impl Into<PathBuf>,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, RasterError> {
        let too_large = RasterError::TooLarge {
            width,
            height,
            format,
        };
        let row_bytes = row_bytes(width, format).ok_or_else(|| too_large.clone())?;
        if stride < row_bytes {
            return Err(RasterError::StrideTooShort { stride, row_bytes });
        }
        let expected = stride.checked_mul(height as usize).ok_or(too_large)?;
        if pixels.len() != expected {
            return Err(RasterError::BufferSize {
                expected,
                actual: pixels.len(),
                stride,
                height,
            });
        }
        Ok(Self {
            source_path: source_path.into(),
            pixels,
            width,
            height,
            stride,
            format,
            exported_to: None,
        })
    }

    /// Build a record with tightly packed rows (`stride = width * bpp`).
    pub fn packed(
        source_path: impl Into<PathBuf>,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, RasterError> {
        let stride = row_bytes(width, format).ok_or(RasterError::TooLarge {
            width,
            height,
            format,
        })?;
        Self::new(source_path, pixels, width, height, stride, format)
    }

    /// Replace the pixel content of this record, keeping its identity.
    ///
    /// Used by normalization and cropping: the old buffer is dropped here.
    pub(crate) fn replace_pixels(
        self,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, RasterError> {
        let mut next = Self::packed(self.source_path, pixels, width, height, format)?;
        next.exported_to = self.exported_to;
        Ok(next)
    }

    /// Move the buffer out, leaving the record empty until `replace_pixels`.
    pub(crate) fn take_pixels(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pixels)
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Pixel count, derived from the current dimensions.
    pub fn size_metric(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn exported_to(&self) -> Option<&Path> {
        self.exported_to.as_deref()
    }

    pub(crate) fn set_exported_to(&mut self, path: PathBuf) {
        self.exported_to = Some(path);
    }

    /// Name shown in reports: the written file once exported, else the source.
    pub fn display_path(&self) -> &Path {
        self.exported_to().unwrap_or(&self.source_path)
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the image.
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = y as usize * self.stride + x as usize * bpp;
        (start + bpp <= self.pixels.len()).then_some(start)
    }

    /// Raw bytes of pixel `(x, y)`.
    pub fn pixel_bytes(&self, x: u32, y: u32) -> Option<&[u8]> {
        let start = self.offset(x, y)?;
        self.pixels.get(start..start + self.format.bytes_per_pixel())
    }

    /// Pixel `(x, y)` as a little-endian word. Only 4-byte formats have one.
    pub fn pixel_word(&self, x: u32, y: u32) -> Option<u32> {
        let bytes: [u8; 4] = self.pixel_bytes(x, y)?.try_into().ok()?;
        Some(u32::from_le_bytes(bytes))
    }

    /// Alpha of pixel `(x, y)` via the format's mask and shift.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        let (mask, shift) = self.format.alpha_mask_shift()?;
        let word = self.pixel_word(x, y)?;
        Some(((word & mask) >> shift) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_record(width: u32, height: u32) -> RasterRecord {
        let pixels = (0..width * height)
            .flat_map(|i| [i as u8, 0x11, 0x22, (i * 10) as u8])
            .collect();
        RasterRecord::packed("a.png", pixels, width, height, PixelFormat::Rgba8).unwrap()
    }

    #[test]
    fn new_rejects_mismatched_buffer() {
        let err = RasterRecord::new("a.png", vec![0; 10], 2, 2, 8, PixelFormat::Rgba8).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferSize {
                expected: 16,
                actual: 10,
                stride: 8,
                height: 2
            }
        );
    }

    #[test]
    fn packed_stride_follows_format() {
        let record = RasterRecord::packed("a.png", vec![0; 18], 3, 2, PixelFormat::Rgb8).unwrap();
        assert_eq!(record.stride(), 9);
        assert_eq!(record.size_metric(), 6);
    }

    #[test]
    fn new_rejects_stride_shorter_than_a_row() {
        let err = RasterRecord::new("x.png", vec![0; 4], 4, 1, 4, PixelFormat::Rgba8).unwrap_err();
        assert_eq!(
            err,
            RasterError::StrideTooShort {
                stride: 4,
                row_bytes: 16
            }
        );
    }

    #[test]
    fn new_rejects_zero_stride_for_nonempty_rows() {
        let err =
            RasterRecord::new("big.png", Vec::new(), 70_000, 70_000, 0, PixelFormat::Rgba8)
                .unwrap_err();
        assert!(matches!(err, RasterError::StrideTooShort { stride: 0, .. }));
    }

    #[test]
    fn new_rejects_unaddressable_sizes() {
        let err = RasterRecord::new("big.png", Vec::new(), 1, u32::MAX, usize::MAX, PixelFormat::L8)
            .unwrap_err();
        assert!(matches!(err, RasterError::TooLarge { .. }));
    }

    #[test]
    fn zero_width_rows_are_empty() {
        let record = RasterRecord::packed("empty.png", Vec::new(), 0, 5, PixelFormat::Rgba8).unwrap();
        assert_eq!(record.stride(), 0);
        assert_eq!(record.size_metric(), 0);
    }

    #[test]
    fn size_metric_does_not_overflow_u32() {
        // Built directly: a real buffer for these dimensions would be ~19 GB.
        let record = RasterRecord {
            source_path: PathBuf::from("big.png"),
            pixels: Vec::new(),
            width: 70_000,
            height: 70_000,
            stride: 280_000,
            format: PixelFormat::Rgba8,
            exported_to: None,
        };
        assert_eq!(record.size_metric(), 4_900_000_000);
        assert_eq!(record.alpha_at(0, 0), None);
        let r = Rect::new(u32::MAX, 0, u32::MAX, 1);
        assert_eq!(r.right(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn alpha_reads_high_byte_of_word() {
        let record = rgba_record(3, 2);
        // pixel index 4 → (1, 1), alpha = 40
        assert_eq!(record.alpha_at(1, 1), Some(40));
        assert_eq!(record.pixel_word(1, 1), Some(u32::from_le_bytes([4, 0x11, 0x22, 40])));
    }

    #[test]
    fn accessor_is_bounds_checked() {
        let record = rgba_record(3, 2);
        assert_eq!(record.alpha_at(3, 0), None);
        assert_eq!(record.alpha_at(0, 2), None);
        assert_eq!(record.pixel_bytes(2, 1).map(<[u8]>::len), Some(4));
    }

    #[test]
    fn alpha_undefined_for_non_canonical_formats() {
        let record = RasterRecord::packed("a.png", vec![0; 8], 2, 2, PixelFormat::La8).unwrap();
        assert_eq!(record.alpha_at(0, 0), None);
        assert_eq!(record.pixel_word(0, 0), None);
    }

    #[test]
    fn display_path_prefers_export_target() {
        let mut record = rgba_record(1, 1);
        assert_eq!(record.display_path(), Path::new("a.png"));
        record.set_exported_to(PathBuf::from("out/a.png"));
        assert_eq!(record.display_path(), Path::new("out/a.png"));
    }

    #[test]
    fn rect_bounds() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!((r.right(), r.bottom()), (6, 8));
        assert!(r.fits_within(6, 8));
        assert!(!r.fits_within(5, 8));
        assert!(Rect::new(1, 1, 0, 3).is_empty());
        assert_eq!(r.to_string(), "4x5+2+3");
    }
}
