//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations that touch encoded
//! bytes: decode a file into a [`RasterRecord`] and write a record out as PNG.
//! Everything between those two points (normalize, analyze, crop, report)
//! is plain pixel arithmetic and needs no backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use crate::raster::RasterRecord;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image codec backends.
pub trait ImageBackend {
    /// Decode an image file, keeping its native pixel format and stride.
    fn decode(&self, path: &Path) -> Result<RasterRecord, BackendError>;

    /// Encode a record as PNG and write it to `output`.
    fn write_png(&self, record: &RasterRecord, output: &Path) -> Result<(), BackendError>;
}
