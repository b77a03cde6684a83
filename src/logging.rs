//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through the `log` facade; stdout carries only the
//! report. The default filter is `warn`, which keeps failed exports visible
//! and hides skipped files. `-d` lowers it to `debug`. `IBP_LOG` (same syntax
//! as `RUST_LOG`) overrides both.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "IBP_LOG";

/// Level used when `IBP_LOG` is unset.
pub fn default_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the global logger. Safe to call more than once; later calls are no-ops.
pub fn init_logger(debug: bool) {
    let _ = Builder::new()
        .filter_level(default_level(debug))
        .parse_env(Env::new().filter(LOG_ENV))
        .format_timestamp(None)
        .format_target(false)
        .target(Target::Stderr)
        .try_init();
}
