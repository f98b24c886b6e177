//! Diagnostic logging
//!
//! The terminal is in raw mode while the editor runs, so logs go to a file:
//! `$XDG_STATE_HOME/tagedit/tagedit.log` or the platform data directory,
//! rotated daily. Filtering follows the `TAGEDIT_LOG` environment variable
//! (`TAGEDIT_LOG=tagedit::syntax=trace`), defaulting to `info`.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "TAGEDIT_LOG";

/// Directory log files are written to
pub fn logs_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("tagedit"))
}

/// Install the file subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed. Returns None if no log directory exists.
pub fn init() -> Option<WorkerGuard> {
    let dir = logs_dir()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: could not create log directory {}: {}", dir.display(), e);
        return None;
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::daily(dir, "tagedit.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init();

    match result {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}
