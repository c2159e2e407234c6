//! Runtime configuration for the limits command.
//!
//! Defaults point at the real provider endpoints and the host's credentials
//! file. Each value can be overridden through a `PI_LIMITS_*` environment
//! variable; the `--auth-file` flag beats the environment.

use crate::paths;
use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://cloudcode-pa.googleapis.com";
pub const DEFAULT_COPILOT_BASE_URL: &str = "https://api.github.com";

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_WIDGET_CLEAR_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct LimitsConfig {
    /// Credentials file, normally `~/.pi/agent/auth.json`
    pub auth_path: PathBuf,
    pub gemini_base_url: String,
    pub copilot_base_url: String,
    /// Global timeout applied to every provider request
    pub http_timeout: Duration,
    /// How long the widget stays up before it is cleared
    pub widget_clear_delay: Duration,
}

impl LimitsConfig {
    /// Builds the default configuration for the current home directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_auth_path(paths::auth_file_path()?))
    }

    pub fn with_auth_path(auth_path: PathBuf) -> Self {
        Self {
            auth_path,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            copilot_base_url: DEFAULT_COPILOT_BASE_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            widget_clear_delay: DEFAULT_WIDGET_CLEAR_DELAY,
        }
    }

    /// Builds the configuration from defaults plus `PI_LIMITS_*` overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match non_empty_var("PI_LIMITS_AUTH_FILE") {
            Some(path) => Self::with_auth_path(PathBuf::from(path)),
            None => Self::new()?,
        };

        if let Some(url) = non_empty_var("PI_LIMITS_GEMINI_BASE_URL") {
            config.gemini_base_url = url;
        }
        if let Some(url) = non_empty_var("PI_LIMITS_COPILOT_BASE_URL") {
            config.copilot_base_url = url;
        }
        if let Some(timeout) = seconds_var("PI_LIMITS_HTTP_TIMEOUT") {
            config.http_timeout = timeout;
        }
        if let Some(delay) = seconds_var("PI_LIMITS_WIDGET_SECONDS") {
            config.widget_clear_delay = delay;
        }

        Ok(config)
    }

    pub fn load_code_assist_url(&self) -> String {
        format!(
            "{}/v1internal:loadCodeAssist",
            self.gemini_base_url.trim_end_matches('/')
        )
    }

    pub fn retrieve_user_quota_url(&self) -> String {
        format!(
            "{}/v1internal:retrieveUserQuota",
            self.gemini_base_url.trim_end_matches('/')
        )
    }

    pub fn copilot_user_url(&self) -> String {
        format!(
            "{}/copilot_internal/user",
            self.copilot_base_url.trim_end_matches('/')
        )
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn seconds_var(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
