//! CLI report formatting.
//!
//! One header line, then one line per record in the order given:
//!
//! ```text
//!     w     h pitch       size     pixfmt name
//!    12     9    48        108      RGBA8 sprites/hero.png
//!     8     5    32         40      RGBA8 out/hero.png
//! ```
//!
//! Columns are width, height, row stride in bytes, pixel count, pixel format
//! and name. The name is the exported file once a record has been written,
//! otherwise the source path.
//!
//! # Architecture
//!
//! [`format_report`] is pure (returns `Vec<String>`) for testability and
//! [`print_report`] writes it to stdout.

use crate::raster::RasterRecord;

/// Column headers, in display order.
pub const HEADERS: [&str; 6] = ["w", "h", "pitch", "size", "pixfmt", "name"];

/// Format one report line from already-rendered cells.
fn report_line(w: &str, h: &str, pitch: &str, size: &str, pixfmt: &str, name: &str) -> String {
    format!("{w:>5} {h:>5} {pitch:>5} {size:>10} {pixfmt:>10} {name}")
}

/// Format the header line.
pub fn format_header() -> String {
    let [w, h, pitch, size, pixfmt, name] = HEADERS;
    report_line(w, h, pitch, size, pixfmt, name)
}

/// Format the line for a single record.
pub fn format_record(record: &RasterRecord) -> String {
    report_line(
        &record.width().to_string(),
        &record.height().to_string(),
        &record.stride().to_string(),
        &record.size_metric().to_string(),
        record.format().name(),
        &record.display_path().display().to_string(),
    )
}

/// Format the full report: header plus one line per record.
pub fn format_report(records: &[RasterRecord]) -> Vec<String> {
    std::iter::once(format_header())
        .chain(records.iter().map(format_record))
        .collect()
}

/// Print the report to stdout.
pub fn print_report(records: &[RasterRecord]) {
    for line in format_report(records) {
        println!("{}", line);
    }
}
