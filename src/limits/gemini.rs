//! Gemini Code Assist quota via the cloudcode API.

use super::http::{HttpRequest, HttpTransport};
use super::types::{LoadCodeAssistResponse, QuotaBucket, RetrieveUserQuotaResponse};
use crate::config::LimitsConfig;
use crate::usage_reset::format_reset_time;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Fetches the account tier and per-model quota, formatted for display.
///
/// Failed statuses degrade to a single explanatory line; only transport and
/// decoding failures are returned as errors.
pub fn fetch_gemini_usage(
    transport: &dyn HttpTransport,
    config: &LimitsConfig,
    access_token: &str,
) -> Result<Vec<String>> {
    let load_reply = transport
        .send(&HttpRequest::post_json(
            config.load_code_assist_url(),
            access_token,
            serde_json::json!({
                "metadata": {
                    "ideType": "IDE_UNSPECIFIED",
                    "platform": "PLATFORM_UNSPECIFIED",
                    "pluginType": "GEMINI"
                }
            }),
        ))
        .context("Failed to load Gemini Code Assist")?;

    if !load_reply.is_success() {
        tracing::warn!("Gemini loadCodeAssist returned {}", load_reply.status);
        return Ok(vec!["Gemini: Auth failed".to_string()]);
    }

    let load: LoadCodeAssistResponse = load_reply.json()?;
    let tier = load.tier_name();

    let Some(project_id) = load.project_id() else {
        return Ok(vec![format!(
            "Gemini: Connected (Tier: {}), but no project ID",
            tier
        )]);
    };
    tracing::debug!("Gemini project {} on tier {}", project_id, tier);

    let quota_reply = transport
        .send(&HttpRequest::post_json(
            config.retrieve_user_quota_url(),
            access_token,
            serde_json::json!({ "project": project_id }),
        ))
        .context("Failed to fetch Gemini quota")?;

    if !quota_reply.is_success() {
        tracing::warn!("Gemini retrieveUserQuota returned {}", quota_reply.status);
        return Ok(vec![format!(
            "Gemini: Connected (Tier: {}), but failed to fetch quota",
            tier
        )]);
    }

    let quota: RetrieveUserQuotaResponse = quota_reply.json()?;
    Ok(format_gemini_report(tier, &quota.buckets))
}

/// Header line plus one line per distinct model, first bucket wins.
pub fn format_gemini_report(tier: &str, buckets: &[QuotaBucket]) -> Vec<String> {
    let mut lines = vec![format!("Gemini ({}):", tier)];
    let mut seen_models: HashSet<&str> = HashSet::new();

    for bucket in buckets {
        let (Some(model_id), Some(remaining)) =
            (bucket.model_id.as_deref(), bucket.remaining_fraction)
        else {
            tracing::debug!("Skipping incomplete Gemini bucket: {:?}", bucket);
            continue;
        };
        if !seen_models.insert(model_id) {
            continue;
        }

        let mut line = format_bucket_line(model_id, remaining);
        if let Some(reset_time) = bucket.reset_time.as_deref() {
            line.push_str(&format!(" (Resets in {})", format_reset_time(reset_time)));
        }
        lines.push(line);
    }

    lines
}

/// "  <model padded to 30> <used% right-aligned to 5>%"
fn format_bucket_line(model_id: &str, remaining_fraction: f64) -> String {
    let used = (1.0 - remaining_fraction) * 100.0;
    format!("  {:<30} {:>5.1}%", model_id, used)
}

#[cfg(test)]
#[path = "tests/gemini_tests.rs"]
mod tests;
