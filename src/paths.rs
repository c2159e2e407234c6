//! Home-based paths for the agent's local state.
//!
//! Everything this tool touches lives under `~/.pi/agent/`:
//! - `auth.json` - Per-provider OAuth credentials (read-only here)
//! - `logs/limits.log` - Debug log, only written when debug logging is enabled

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// The agent directory, relative to the home directory.
const PI_AGENT_DIR: &str = ".pi/agent";

/// The credentials file name inside the agent directory.
const AUTH_FILE_NAME: &str = "auth.json";

#[cfg(test)]
thread_local! {
    static TEST_HOME: std::cell::RefCell<Option<PathBuf>> = const { std::cell::RefCell::new(None) };
}

/// Restores the real home directory when dropped.
#[cfg(test)]
pub struct TestHomeGuard {
    _private: (),
}

#[cfg(test)]
impl Drop for TestHomeGuard {
    fn drop(&mut self) {
        TEST_HOME.with(|home| *home.borrow_mut() = None);
    }
}

/// Overrides the home directory for the current thread until the guard is dropped.
#[cfg(test)]
pub fn set_home_for_test(home: PathBuf) -> TestHomeGuard {
    TEST_HOME.with(|slot| *slot.borrow_mut() = Some(home));
    TestHomeGuard { _private: () }
}

fn home_dir() -> Result<PathBuf> {
    #[cfg(test)]
    {
        if let Some(home) = TEST_HOME.with(|slot| slot.borrow().clone()) {
            return Ok(home);
        }
    }
    dirs::home_dir().context("Could not determine home directory")
}

/// Returns the agent directory: `~/.pi/agent/`
///
/// Does not create it; the credentials file is owned by the host.
pub fn pi_agent_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(PI_AGENT_DIR))
}

/// Returns the credentials file path: `~/.pi/agent/auth.json`
pub fn auth_file_path() -> Result<PathBuf> {
    Ok(pi_agent_dir()?.join(AUTH_FILE_NAME))
}

/// Returns the debug log path: `~/.pi/agent/logs/limits.log`
///
/// Creates the logs directory if it doesn't exist.
pub fn debug_log_path() -> Result<PathBuf> {
    let logs = pi_agent_dir()?.join("logs");
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs.join("limits.log"))
}
