//! Structured logging setup.
//!
//! One `init` call per process; later calls are no-ops so test binaries can
//! call it from every test without coordination.

use std::fs::{File, OpenOptions};
use std::sync::Arc;

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::result::Result;

/// Install the global subscriber: console output filtered by the configured
/// level, plus a `swaglabs_e2e.log` file layer under the log directory.
///
/// Idempotent; a second call leaves the existing subscriber in place.
///
/// # Errors
///
/// Returns [`crate::result::Error::Io`] when the log directory or file cannot
/// be created. The level itself was validated at configuration load.
pub fn init(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("swaglabs_e2e={}", settings.log_level)));

    std::fs::create_dir_all(&settings.log_dir)?;
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(settings.log_dir.join("swaglabs_e2e.log"))?;
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Arc::new(file));

    let console_layer = fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .ok();
    Ok(())
}
