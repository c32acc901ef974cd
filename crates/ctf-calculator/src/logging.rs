//! Tracing setup for the native binary
//!
//! `RUST_LOG` wins over the configured level when it is set. The first call
//! installs the global subscriber; later calls are no-ops.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Filter built from `RUST_LOG`, falling back to `default_level`
#[must_use]
pub fn filter(default_level: &str) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_level)
    }
}

/// Logs to stderr
pub fn init(default_level: &str) {
    init_with_writer(default_level, std::io::stderr, true);
}

/// Logs to `path`, appending; used while the terminal UI owns the screen
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be created.
pub fn init_to_file(default_level: &str, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    init_with_writer(default_level, Mutex::new(file), false);
    Ok(())
}

fn init_with_writer<W>(default_level: &str, writer: W, ansi: bool)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = filter(default_level);
    INIT.call_once(move || {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .with_filter(filter);

        // a subscriber set by the embedding application stays in place
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
