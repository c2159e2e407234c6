use super::*;

fn entry(access: Option<&str>, refresh: Option<&str>) -> AuthEntry {
    AuthEntry {
        kind: "oauth".to_string(),
        access: access.map(String::from),
        refresh: refresh.map(String::from),
        ..Default::default()
    }
}

#[test]
fn test_auth_store_parses_pi_auth_file() {
    let json = r#"{
        "google-gemini-cli": {
            "type": "oauth",
            "access": "ya29.token",
            "refresh": "1//refresh",
            "expires": 1769283296000,
            "projectId": "proj-123"
        },
        "github-copilot": {
            "type": "oauth",
            "refresh": "ghu_refresh",
            "access": "tid=abc",
            "expires": 1769283296000,
            "enterpriseUrl": null
        }
    }"#;

    let store: AuthStore = serde_json::from_str(json).unwrap();
    let gemini = store.get("google-gemini-cli").unwrap();
    assert_eq!(gemini.kind, "oauth");
    assert_eq!(gemini.access.as_deref(), Some("ya29.token"));
    assert_eq!(gemini.expires, Some(1769283296000));
    assert_eq!(gemini.project_id.as_deref(), Some("proj-123"));

    let copilot = store.get("github-copilot").unwrap();
    assert_eq!(copilot.refresh.as_deref(), Some("ghu_refresh"));
    assert!(!store.is_empty());
}

#[test]
fn test_auth_entry_minimal() {
    let entry: AuthEntry = serde_json::from_str(r#"{"type": "api_key"}"#).unwrap();
    assert_eq!(entry.kind, "api_key");
    assert_eq!(entry.access, None);
    assert_eq!(entry.project_id, None);
}

#[test]
fn test_provider_order_and_keys() {
    assert_eq!(
        ProviderKind::ALL,
        [ProviderKind::Gemini, ProviderKind::Copilot]
    );
    assert_eq!(ProviderKind::Gemini.auth_key(), "google-gemini-cli");
    assert_eq!(ProviderKind::Copilot.auth_key(), "github-copilot");
    assert_eq!(
        ProviderKind::Copilot.error_line(),
        "GitHub Copilot: Error fetching usage"
    );
}

#[test]
fn test_gemini_uses_access_token_only() {
    let gemini = ProviderKind::Gemini;
    assert_eq!(gemini.select_token(&entry(Some("a"), Some("r"))), Some("a"));
    assert_eq!(gemini.select_token(&entry(None, Some("r"))), None);
    assert_eq!(gemini.select_token(&entry(Some(""), None)), None);
}

#[test]
fn test_copilot_prefers_refresh_token() {
    let copilot = ProviderKind::Copilot;
    assert_eq!(copilot.select_token(&entry(Some("a"), Some("r"))), Some("r"));
    assert_eq!(copilot.select_token(&entry(Some("a"), None)), Some("a"));
    assert_eq!(copilot.select_token(&entry(Some("a"), Some(""))), Some("a"));
    assert_eq!(copilot.select_token(&entry(None, None)), None);
}

#[test]
fn test_load_code_assist_project_id_forms() {
    let bare: LoadCodeAssistResponse = serde_json::from_str(
        r#"{"cloudaicompanionProject": "proj-1", "currentTier": {"id": "free-tier", "name": "Gemini Code Assist for individuals"}}"#,
    )
    .unwrap();
    assert_eq!(bare.project_id(), Some("proj-1"));
    assert_eq!(bare.tier_name(), "Gemini Code Assist for individuals");

    let object: LoadCodeAssistResponse =
        serde_json::from_str(r#"{"cloudaicompanionProject": {"id": "proj-2", "name": "x"}}"#)
            .unwrap();
    assert_eq!(object.project_id(), Some("proj-2"));
    assert_eq!(object.tier_name(), "unknown");

    let missing: LoadCodeAssistResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(missing.project_id(), None);
}

#[test]
fn test_quota_buckets_tolerate_missing_fields() {
    let quota: RetrieveUserQuotaResponse = serde_json::from_str(
        r#"{"buckets": [
            {"modelId": "gemini-2.5-pro", "remainingFraction": 1, "tokenType": "REQUESTS"},
            {"remainingFraction": 0.5}
        ]}"#,
    )
    .unwrap();
    assert_eq!(quota.buckets.len(), 2);
    assert_eq!(quota.buckets[0].remaining_fraction, Some(1.0));
    assert_eq!(quota.buckets[0].reset_time, None);
    assert_eq!(quota.buckets[1].model_id, None);

    let empty: RetrieveUserQuotaResponse = serde_json::from_str("{}").unwrap();
    assert!(empty.buckets.is_empty());
}

#[test]
fn test_premium_interactions_math() {
    let premium = PremiumInteractions {
        entitlement: 100.0,
        remaining: 30.0,
    };
    assert_eq!(premium.used(), 70.0);
    assert_eq!(premium.used_percent(), Some(70.0));

    let unlimited = PremiumInteractions {
        entitlement: 0.0,
        remaining: 0.0,
    };
    assert_eq!(unlimited.used_percent(), None);
}

#[test]
fn test_copilot_user_response() {
    let user: CopilotUserResponse = serde_json::from_str(
        r#"{
            "copilot_plan": "individual",
            "quota_reset_date_utc": "2026-02-01T00:00:00.000Z",
            "quota_snapshots": {
                "chat": {"entitlement": 0, "remaining": 0, "unlimited": true},
                "premium_interactions": {"entitlement": 300, "remaining": 120.5}
            }
        }"#,
    )
    .unwrap();
    assert_eq!(user.copilot_plan.as_deref(), Some("individual"));
    let premium = user
        .quota_snapshots
        .and_then(|s| s.premium_interactions)
        .unwrap();
    assert_eq!(premium.remaining, 120.5);
}

#[test]
fn test_incomplete_premium_snapshot_reads_as_absent() {
    let user: CopilotUserResponse = serde_json::from_str(
        r#"{
            "copilot_plan": "business",
            "quota_snapshots": {"premium_interactions": {"entitlement": 300}}
        }"#,
    )
    .unwrap();
    assert_eq!(user.copilot_plan.as_deref(), Some("business"));
    assert_eq!(
        user.quota_snapshots.and_then(|s| s.premium_interactions),
        None
    );

    let nulls: CopilotUserResponse = serde_json::from_str(
        r#"{"quota_snapshots": {"premium_interactions": {"entitlement": null, "remaining": 5}}}"#,
    )
    .unwrap();
    assert!(nulls
        .quota_snapshots
        .and_then(|s| s.premium_interactions)
        .is_none());

    let explicit_null: CopilotUserResponse =
        serde_json::from_str(r#"{"quota_snapshots": {"premium_interactions": null}}"#).unwrap();
    assert!(explicit_null
        .quota_snapshots
        .and_then(|s| s.premium_interactions)
        .is_none());
}
