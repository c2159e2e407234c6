//! GitHub Copilot premium interaction quota.

use super::http::{HttpRequest, HttpTransport};
use super::types::CopilotUserResponse;
use crate::config::LimitsConfig;
use crate::usage_reset::ResetTimestamp;
use anyhow::{Context, Result};

pub fn fetch_copilot_usage(
    transport: &dyn HttpTransport,
    config: &LimitsConfig,
    token: &str,
) -> Result<Vec<String>> {
    let reply = transport
        .send(&HttpRequest::get(config.copilot_user_url(), token))
        .context("Failed to fetch Copilot user")?;

    if !reply.is_success() {
        tracing::warn!("Copilot user endpoint returned {}", reply.status);
        return Ok(vec![format!("GitHub Copilot: Auth failed ({})", reply.status)]);
    }

    let user: CopilotUserResponse = reply.json()?;
    Ok(format_copilot_report(&user))
}

pub fn format_copilot_report(user: &CopilotUserResponse) -> Vec<String> {
    let plan = user.copilot_plan.as_deref().unwrap_or("unknown");
    let mut lines = vec![format!("GitHub Copilot ({}):", plan)];

    let premium = user
        .quota_snapshots
        .as_ref()
        .and_then(|snapshots| snapshots.premium_interactions);

    let Some(premium) = premium else {
        lines.push("  Quota info not available".to_string());
        return lines;
    };

    let mut line = format!(
        "  Premium Interactions: {}/{}",
        premium.used(),
        premium.entitlement
    );
    if let Some(percent) = premium.used_percent() {
        line.push_str(&format!(" ({:.1}%)", percent));
    }
    if let Some(reset) = user.quota_reset_date_utc.as_deref() {
        // Unparseable dates are shown verbatim rather than dropped.
        let when = ResetTimestamp::parse(reset)
            .map(|ts| ts.format_local())
            .unwrap_or_else(|| reset.to_string());
        line.push_str(&format!(" (Resets: {})", when));
    }
    lines.push(line);

    lines
}
