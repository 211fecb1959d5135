// src/logging.rs

//! Tracing setup and the diagnostic failure log

use std::fs::OpenOptions;
use std::io::Write;

use tracing_subscriber::EnvFilter;

use crate::Error;
use crate::config::{Config, Verbosity};

/// Initialize the tracing subscriber once at startup. RUST_LOG, when
/// present, overrides the flag-derived threshold.
pub fn init(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(verbosity.level_str())),
        )
        .init();
}

/// Append a failed invocation, with its error kind and a captured
/// backtrace, to the diagnostic log. Never masks the original failure:
/// write problems are swallowed.
pub fn log_failure(config: &Config, err: &Error) {
    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&config.log_path) else {
        return;
    };
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let backtrace = std::backtrace::Backtrace::force_capture();
    let _ = writeln!(file, "{} {}: {}\n{}", stamp, err.kind(), err, backtrace);
}
