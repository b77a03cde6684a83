//! Pixel work and the image codec seam, all on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (native layout kept) |
//! | **Normalize** | `DynamicImage::to_rgba8` |
//! | **Alpha bounds** | scan over [`RasterRecord::alpha_at`](crate::raster::RasterRecord::alpha_at) |
//! | **Crop** | `image::imageops::crop_imm` |
//! | **Encode** | `image::codecs::png::PngEncoder` |
//!
//! The module is split into:
//! - **Pixel stages**: `normalize`, `analyze`, `crop`: pure functions over records
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] (decode / encode only)
//! - **Operations**: [`trim`] and [`export`], chaining the two together

pub mod analyze;
pub mod backend;
pub mod crop;
pub mod normalize;
pub mod operations;
pub mod rust_backend;

pub use analyze::{AlphaBounds, alpha_bounds, significance};
pub use backend::{BackendError, ImageBackend};
pub use crop::crop;
pub use normalize::normalize;
pub use operations::{TrimOutcome, export, trim};
pub use rust_backend::RustBackend;
