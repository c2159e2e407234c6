//! The usage reporter behind the `limits` and `usage` commands.
//!
//! One invocation: load credentials, query each known provider in turn,
//! show the collected lines as a widget and clear it again after a delay.

use super::copilot::fetch_copilot_usage;
use super::credentials::CredentialSource;
use super::gemini::fetch_gemini_usage;
use super::http::HttpTransport;
use super::types::{AuthStore, ProviderKind};
use crate::config::LimitsConfig;
use crate::host_ui::{HostUi, NotifyLevel, WidgetOptions};
use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Status and widget slot used by the command.
pub const LIMITS_KEY: &str = "limits";

/// What one invocation left on screen.
pub enum ReportOutcome {
    /// Nothing to show; the user got a warning notice instead.
    Empty,
    /// The widget is up; `clear` completes once it has been removed.
    Displayed {
        lines: Vec<String>,
        clear: JoinHandle<()>,
    },
}

pub struct UsageReporter {
    ui: Arc<dyn HostUi>,
    credentials: Arc<dyn CredentialSource>,
    transport: Arc<dyn HttpTransport>,
    config: Arc<LimitsConfig>,
}

impl UsageReporter {
    pub fn new(
        ui: Arc<dyn HostUi>,
        credentials: Arc<dyn CredentialSource>,
        transport: Arc<dyn HttpTransport>,
        config: LimitsConfig,
    ) -> Self {
        Self {
            ui,
            credentials,
            transport,
            config: Arc::new(config),
        }
    }

    /// Runs one invocation. Never fails: every problem ends up as text.
    pub async fn run(&self) -> ReportOutcome {
        let auth = self.load_credentials();

        self.ui.set_status(LIMITS_KEY, Some("Fetching limits..."));

        let mut results: Vec<String> = Vec::new();
        for provider in ProviderKind::ALL {
            let Some(entry) = auth.get(provider.auth_key()) else {
                continue;
            };
            let Some(token) = provider.select_token(entry) else {
                tracing::debug!("{} entry has no usable token", provider.display_name());
                continue;
            };
            results.extend(self.fetch_provider(provider, token.to_string()).await);
        }

        let outcome = if results.is_empty() {
            self.ui
                .notify("No subscriptions found in auth.json", NotifyLevel::Warning);
            ReportOutcome::Empty
        } else {
            self.ui
                .set_widget(LIMITS_KEY, Some(&results), WidgetOptions::below_editor());
            let clear = self.schedule_clear();
            ReportOutcome::Displayed {
                lines: results,
                clear,
            }
        };

        self.ui.set_status(LIMITS_KEY, None);
        outcome
    }

    fn load_credentials(&self) -> AuthStore {
        match self.credentials.load() {
            Ok(store) => {
                if store.is_empty() {
                    tracing::debug!("No credentials available");
                }
                store
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                self.ui.notify("Failed to read auth.json", NotifyLevel::Error);
                AuthStore::default()
            }
        }
    }

    /// Runs the blocking fetch off the async runtime and folds any failure
    /// into the provider's error line.
    async fn fetch_provider(&self, provider: ProviderKind, token: String) -> Vec<String> {
        let transport = Arc::clone(&self.transport);
        let config = Arc::clone(&self.config);
        let joined = tokio::task::spawn_blocking(move || {
            fetch_usage_for_provider(provider, transport.as_ref(), &config, &token)
        })
        .await;

        match joined {
            Ok(Ok(lines)) => lines,
            Ok(Err(e)) => {
                tracing::warn!("{} fetch failed: {:#}", provider.display_name(), e);
                vec![provider.error_line()]
            }
            Err(e) => {
                tracing::warn!("{} fetch task aborted: {}", provider.display_name(), e);
                vec![provider.error_line()]
            }
        }
    }

    /// Fire-and-forget: not cancelled if another invocation replaces the widget.
    fn schedule_clear(&self) -> JoinHandle<()> {
        let ui = Arc::clone(&self.ui);
        let delay = self.config.widget_clear_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            ui.set_widget(LIMITS_KEY, None, WidgetOptions::default());
        })
    }
}

/// Fetches display lines for one provider with the chosen token.
pub fn fetch_usage_for_provider(
    provider: ProviderKind,
    transport: &dyn HttpTransport,
    config: &LimitsConfig,
    token: &str,
) -> Result<Vec<String>> {
    match provider {
        ProviderKind::Gemini => fetch_gemini_usage(transport, config, token),
        ProviderKind::Copilot => fetch_copilot_usage(transport, config, token),
    }
}

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod tests;
