//! Log file setup
//!
//! Log entries are appended to a plain text file. The subscriber is returned
//! as a value and scoped to the run rather than installed globally.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "pricecheck=info";

/// Opens the log file for appending, creating it if needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Reads `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Builds a subscriber that writes entries passing `filter` to `file`
pub fn file_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file)),
    )
}
