//! The batch pipeline: load → trim → export → sort.
//!
//! Each stage finishes for every record before the next stage starts, and
//! records move through the stages in input order.
//!
//! ```text
//! load_images   paths    → records   (undecodable files skipped)
//! trim_all      records  → records   (only with -c; normalize, bound, crop)
//! export_all    records  → PNG files (only with -D; failures reported per file)
//! sort_by_size  records  → records   (only with -s; stable)
//! ```
//!
//! ## Failure policy
//!
//! | Failure | Handling |
//! |---|---|
//! | Decode error | File skipped, logged at `info`, batch continues |
//! | Export error | Logged at `warn`, record still reported, batch continues, nonzero exit at the end |
//! | Normalize / crop error | [`PipelineError`]: the run stops |
//!
//! Trim errors are never downgraded to skips: they mean the pixel stages
//! disagree with each other, not that an input file is bad.

use crate::config::{ConfigError, TrimConfig};
use crate::imaging::{BackendError, ImageBackend, TrimOutcome, export, trim};
use crate::raster::{RasterError, RasterRecord};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("internal error while trimming {path}: {source}")]
    Raster {
        path: PathBuf,
        #[source]
        source: RasterError,
    },
    #[error("{failed} of {total} images could not be exported")]
    ExportsFailed { failed: usize, total: usize },
}

/// A file the loader could not decode.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: BackendError,
}

/// A record the exporter could not write.
#[derive(Debug)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub error: BackendError,
}

/// Output of the load stage.
#[derive(Debug, Default)]
pub struct Loaded {
    pub records: Vec<RasterRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl Loaded {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Everything a finished run produced.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Records in report order.
    pub records: Vec<RasterRecord>,
    pub skipped: Vec<SkippedFile>,
    pub export_failures: Vec<ExportFailure>,
}

impl BatchResult {
    /// Error if any export failed. The records are still complete and
    /// reportable either way.
    pub fn check_exports(&self) -> Result<(), PipelineError> {
        if self.export_failures.is_empty() {
            return Ok(());
        }
        Err(PipelineError::ExportsFailed {
            failed: self.export_failures.len(),
            total: self.records.len(),
        })
    }
}

/// Decode every path, keeping input order and skipping failures.
pub fn load_images<P: AsRef<Path>>(backend: &impl ImageBackend, paths: &[P]) -> Loaded {
    let mut loaded = Loaded::default();
    for path in paths {
        let path = path.as_ref();
        match backend.decode(path) {
            Ok(record) => {
                debug!(
                    "loaded {} ({}x{} {})",
                    path.display(),
                    record.width(),
                    record.height(),
                    record.format()
                );
                loaded.records.push(record);
            }
            Err(error) => {
                info!("{}: {}", path.display(), error);
                loaded.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }
    loaded
}

/// Trim every record at `threshold`. Stops at the first internal error.
pub fn trim_all(
    records: Vec<RasterRecord>,
    threshold: u8,
) -> Result<Vec<RasterRecord>, PipelineError> {
    records
        .into_iter()
        .map(|record| {
            let path = record.source_path().to_path_buf();
            let (trimmed, outcome) =
                trim(record, threshold).map_err(|source| PipelineError::Raster {
                    path: path.clone(),
                    source,
                })?;
            match outcome {
                TrimOutcome::Cropped(rect) => debug!("{}: cropped to {rect}", path.display()),
                TrimOutcome::NothingSignificant => info!(
                    "{}: no pixel with alpha above {threshold}, left uncropped",
                    path.display()
                ),
            }
            Ok(trimmed)
        })
        .collect()
}

/// Export every record into `dest_dir`, collecting per-file failures.
pub fn export_all(
    backend: &impl ImageBackend,
    records: &mut [RasterRecord],
    dest_dir: &Path,
) -> Vec<ExportFailure> {
    let mut failures = Vec::new();
    for record in records.iter_mut() {
        match export(backend, record, dest_dir) {
            Ok(written) => debug!("{} → {}", record.source_path().display(), written.display()),
            Err(error) => {
                warn!("{}: export failed: {}", record.source_path().display(), error);
                failures.push(ExportFailure {
                    path: record.source_path().to_path_buf(),
                    error,
                });
            }
        }
    }
    failures
}

/// Order records by ascending pixel count. Equal sizes keep their order.
pub fn sort_by_size(records: &mut [RasterRecord]) {
    records.sort_by_key(RasterRecord::size_metric);
}

/// Run the whole batch described by `config`.
pub fn run(backend: &impl ImageBackend, config: &TrimConfig) -> Result<BatchResult, PipelineError> {
    config.validate()?;

    let Loaded { mut records, skipped } = load_images(backend, &config.inputs);

    if let Some(threshold) = config.crop_threshold {
        records = trim_all(records, threshold)?;
    }

    let export_failures = match &config.dest_dir {
        Some(dest) => export_all(backend, &mut records, dest),
        None => Vec::new(),
    };

    if config.sort {
        sort_by_size(&mut records);
    }

    Ok(BatchResult {
        records,
        skipped,
        export_failures,
    })
}
