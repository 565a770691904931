//! Logger initialisation.
//!
//! The analysis crates emit `tracing` events. With the `log` feature of
//! `tracing` enabled and no subscriber installed, those events are forwarded
//! to the `log` facade and printed by `env_logger`.

use log::LevelFilter;

/// Initialises logging for the given verbosity (`-v` count).
///
/// `RUST_LOG` still overrides the per-module level.
pub fn setup_logging(verbosity: u8) {
    use std::io::Write;

    let mut builder = env_logger::builder();
    builder.format(|buf, record| {
        let top_level_module = record
            .module_path()
            .and_then(|path| path.split("::").next())
            .unwrap_or("?");
        writeln!(
            buf,
            "{:5} [{}]: {}",
            record.level(),
            top_level_module,
            record.args()
        )
    });
    builder
        .filter_level(log_filter_from_verbosity(verbosity))
        .parse_default_env()
        .init();
}

/// Converts a `-v` count to a log filter. Warnings are shown by default.
pub const fn log_filter_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
