//! Data types for the credentials file and the provider quota APIs.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One provider's entry in `auth.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    /// Access token expiry, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// The whole credentials file, keyed by provider identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthStore(pub BTreeMap<String, AuthEntry>);

impl AuthStore {
    pub fn get(&self, key: &str) -> Option<&AuthEntry> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Providers the limits command knows how to query, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    Copilot,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::Copilot];

    /// Key of this provider's entry in `auth.json`.
    pub fn auth_key(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "google-gemini-cli",
            ProviderKind::Copilot => "github-copilot",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Copilot => "GitHub Copilot",
        }
    }

    /// Picks the bearer token to use for this provider.
    ///
    /// Copilot prefers the refresh token and falls back to the access token;
    /// the refresh token is sent as-is, no exchange is performed.
    pub fn select_token<'a>(&self, entry: &'a AuthEntry) -> Option<&'a str> {
        let token = match self {
            ProviderKind::Gemini => entry.access.as_deref(),
            ProviderKind::Copilot => non_empty(entry.refresh.as_deref())
                .or_else(|| non_empty(entry.access.as_deref())),
        };
        non_empty(token)
    }

    /// Single line shown when the fetch routine errors out.
    pub fn error_line(&self) -> String {
        format!("{}: Error fetching usage", self.display_name())
    }
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.filter(|t| !t.trim().is_empty())
}

// Gemini Code Assist

/// Response of `v1internal:loadCodeAssist`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCodeAssistResponse {
    #[serde(default)]
    pub cloudaicompanion_project: Option<CompanionProject>,
    #[serde(default)]
    pub current_tier: Option<UserTier>,
}

impl LoadCodeAssistResponse {
    pub fn project_id(&self) -> Option<&str> {
        let id = match self.cloudaicompanion_project.as_ref()? {
            CompanionProject::Id(id) => Some(id.as_str()),
            CompanionProject::Object { id } => id.as_deref(),
        };
        id.filter(|id| !id.is_empty())
    }

    pub fn tier_name(&self) -> &str {
        self.current_tier
            .as_ref()
            .and_then(|tier| tier.name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("unknown")
    }
}

/// The project is usually a bare id, some accounts get an object instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompanionProject {
    Id(String),
    Object {
        #[serde(default)]
        id: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserTier {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `v1internal:retrieveUserQuota`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveUserQuotaResponse {
    #[serde(default)]
    pub buckets: Vec<QuotaBucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaBucket {
    #[serde(default)]
    pub model_id: Option<String>,
    /// 1.0 = untouched, 0.0 = exhausted
    #[serde(default)]
    pub remaining_fraction: Option<f64>,
    #[serde(default)]
    pub reset_time: Option<String>,
}

// GitHub Copilot

/// Response of `copilot_internal/user`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CopilotUserResponse {
    #[serde(default)]
    pub copilot_plan: Option<String>,
    #[serde(default)]
    pub quota_snapshots: Option<QuotaSnapshots>,
    #[serde(default)]
    pub quota_reset_date_utc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotaSnapshots {
    #[serde(default, deserialize_with = "complete_counters")]
    pub premium_interactions: Option<PremiumInteractions>,
}

/// A snapshot missing either counter reads as absent instead of failing the
/// whole response.
fn complete_counters<'de, D>(deserializer: D) -> Result<Option<PremiumInteractions>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PremiumInteractions {
    pub entitlement: f64,
    pub remaining: f64,
}

impl PremiumInteractions {
    pub fn used(&self) -> f64 {
        self.entitlement - self.remaining
    }

    /// Percentage of the entitlement consumed, None for an empty entitlement.
    pub fn used_percent(&self) -> Option<f64> {
        (self.entitlement > 0.0).then(|| self.used() / self.entitlement * 100.0)
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
