//! Logging setup.
//!
//! The dashboard owns stdout, so log lines go to a file. Filtering follows
//! `RUST_LOG`, defaulting to `birdedge_monitor=info`.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive.
pub const DEFAULT_DIRECTIVE: &str = "birdedge_monitor=info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Route `tracing` output to `path`, creating parent directories.
///
/// Without a path logging stays disabled.
pub fn init_logging(path: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .with(env_filter())
        .init();

    Ok(())
}
