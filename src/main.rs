use clap::Parser;
use ibp::config::TrimConfig;
use ibp::imaging::RustBackend;
use ibp::{logging, output, pipeline};
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ibp")]
#[command(about = "List image attributes, optionally trimming transparent borders")]
#[command(long_about = "\
List image attributes, optionally trimming transparent borders

The default is to list the image attributes: width, height, row pitch in
bytes, pixel count, pixel format and name, one line per image.

With -c, each image is converted to RGBA8 and cropped to the smallest
rectangle holding every pixel whose alpha is above the threshold. Images
with no such pixel are left whole. Cropping needs -D because the trimmed
images are only kept as files.

With -D, every image is written as <DIR>/<name>.png, where <name> is the
file name up to its first dot:

  sprites/hero.v2.gif  →  <DIR>/hero.png

Files that cannot be decoded are skipped; use -d to see which and why.
If any export fails, the report is still printed and the exit status is
nonzero.
Set IBP_LOG (e.g. IBP_LOG=debug) to control diagnostics directly.")]
#[command(version)]
struct Cli {
    /// Crop out transparent borders: keep pixels with alpha above ALPHA (0-255)
    #[arg(short = 'c', value_name = "ALPHA", requires = "dest_dir")]
    crop: Option<u8>,

    /// Report skipped files and per-stage detail on stderr
    #[arg(short = 'd')]
    debug: bool,

    /// Sort the listing by image size (pixel count)
    #[arg(short = 's')]
    sort: bool,

    /// Write the (possibly trimmed) images as .png into DIR
    #[arg(short = 'D', value_name = "DIR")]
    dest_dir: Option<PathBuf>,

    /// Image files to process
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn into_config(self) -> TrimConfig {
        TrimConfig {
            inputs: self.files,
            crop_threshold: self.crop,
            dest_dir: self.dest_dir,
            sort: self.sort,
            debug: self.debug,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logger(cli.debug);

    let config = cli.into_config();
    let result = pipeline::run(&RustBackend::new(), &config)?;
    output::print_report(&result.records);

    if !result.skipped.is_empty() {
        info!(
            "{} of {} files skipped",
            result.skipped.len(),
            config.inputs.len()
        );
    }
    if let Err(e) = result.check_exports() {
        error!("{e}");
        std::process::exit(1);
    }

    Ok(())
}
