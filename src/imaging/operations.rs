//! High-level image operations.
//!
//! These functions chain the pixel stages and the backend: `trim` runs
//! normalize → analyze → crop on one record, `export` names and writes it.

use super::analyze::{AlphaBounds, alpha_bounds};
use super::backend::{BackendError, ImageBackend};
use super::crop::crop;
use super::normalize::normalize;
use crate::naming::output_path;
use crate::raster::{RasterError, RasterRecord, Rect};
use std::path::{Path, PathBuf};

/// What `trim` did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    /// Cut down to `rect` (coordinates in the pre-crop image).
    Cropped(Rect),
    /// No pixel cleared the threshold; the image was left whole.
    NothingSignificant,
}

/// Normalize `record`, find its alpha bounds and crop to them.
///
/// An image with no significant pixel is kept whole (still normalized)
/// rather than cropped to nothing.
pub fn trim(
    record: RasterRecord,
    threshold: u8,
) -> Result<(RasterRecord, TrimOutcome), RasterError> {
    let record = normalize(record)?;
    match alpha_bounds(&record, threshold)? {
        AlphaBounds::Found(rect) => Ok((crop(record, rect)?, TrimOutcome::Cropped(rect))),
        AlphaBounds::NoneSignificant => Ok((record, TrimOutcome::NothingSignificant)),
    }
}

/// Write `record` as PNG into `dest_dir`, creating the directory if needed.
///
/// On success the record remembers where it went and the path is returned.
pub fn export(
    backend: &impl ImageBackend,
    record: &mut RasterRecord,
    dest_dir: &Path,
) -> Result<PathBuf, BackendError> {
    std::fs::create_dir_all(dest_dir)?;
    let output = output_path(record.source_path(), dest_dir);
    backend.write_png(record, &output)?;
    record.set_exported_to(output.clone());
    Ok(output)
}
