//! Debug logging setup.
//!
//! Logging is off unless `PI_LIMITS_DEBUG` is set, in which case events are
//! appended to `~/.pi/agent/logs/limits.log`. `RUST_LOG` narrows the filter.

use crate::paths;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const DEBUG_ENV: &str = "PI_LIMITS_DEBUG";

const DEFAULT_FILTER: &str = "pi_limits=debug";

/// Whether `value` turns debug logging on.
fn is_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

/// Installs the file subscriber when debug logging is enabled.
///
/// Returns the log file path when a subscriber was installed.
pub fn init() -> Result<Option<PathBuf>> {
    if !is_enabled(std::env::var(DEBUG_ENV).ok().as_deref()) {
        return Ok(None);
    }

    let log_path = paths::debug_log_path()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open debug log: {}", log_path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install debug logger: {}", e))?;

    tracing::debug!("pi-limits {} debug logging started", env!("CARGO_PKG_VERSION"));
    Ok(Some(log_path))
}
