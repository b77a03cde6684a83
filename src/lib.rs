//! # ibp
//!
//! A batch image inspector and alpha trimmer. Give it a list of image files
//! and it prints each one's geometry and pixel layout; optionally it trims
//! transparent borders and writes the results out as PNG.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Load     paths    →  records        (decode, native layout kept)
//! 2. Trim     records  →  records        (-c: normalize → alpha bounds → crop)
//! 3. Export   records  →  <dest>/*.png   (-D)
//! 4. Report   records  →  stdout         (-s sorts by pixel count first)
//! ```
//!
//! Every stage completes for the whole batch before the next begins. A bad
//! input file costs only itself: undecodable files are skipped and failed
//! writes are logged, while the rest of the batch carries on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`raster`] | `RasterRecord`, `PixelFormat`, `Rect`; bounds-checked pixel access |
//! | [`imaging`] | Normalize, alpha bounds, crop, and the decode/encode backend |
//! | [`naming`] | Export filename derivation (`a/b/x.tar.gz` → `x.png`) |
//! | [`pipeline`] | Stage drivers and the failure policy |
//! | [`output`] | Report formatting |
//! | [`config`] | Parsed run options and their validation |
//! | [`logging`] | stderr diagnostics via `env_logger` |
//!
//! # Design Decisions
//!
//! ## Records Are Consumed, Not Mutated
//!
//! Normalization and cropping take a [`raster::RasterRecord`] by value and
//! return a new one. The old pixel buffer is dropped inside the call, so no
//! handle to it survives. Only export bookkeeping (`exported_to`) is set in
//! place.
//!
//! ## One Canonical Layout
//!
//! All pixel arithmetic runs on RGBA8 with alpha in the top byte of a
//! little-endian word. Decoders produce many layouts; converting once up
//! front lets the scan read alpha with a single mask and shift.
//!
//! ## Explicit "Nothing Found"
//!
//! The alpha scan returns [`imaging::AlphaBounds::NoneSignificant`] when no
//! pixel clears the threshold instead of an inverted rectangle. The trim
//! stage keeps such images whole.
//!
//! ## Crop Refuses, Never Clamps
//!
//! A rectangle with no area or reaching outside the image is an error. Both
//! indicate a bug upstream, so the run stops.

pub mod config;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod raster;

#[cfg(test)]
pub(crate) mod test_helpers;
