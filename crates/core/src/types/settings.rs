//! Per-tenant settings and the merge-patch applied by the settings endpoint.

use serde::{Deserialize, Serialize};

/// Settings stored on a tenant record.
///
/// `plan` stays a plain string: webhooks deliver arbitrary plan ids and the
/// limiter maps unknown names to `free` instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantSettings {
    pub ai_provider: String,
    pub enable_analytics: bool,
    pub max_products: u32,
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<String>,
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            ai_provider: "local".to_string(),
            enable_analytics: true,
            max_products: 100,
            plan: "free".to_string(),
            subscription_status: None,
        }
    }
}

/// Partial update over [`TenantSettings`]; only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub ai_provider: Option<String>,
    pub enable_analytics: Option<bool>,
    pub max_products: Option<u32>,
    pub plan: Option<String>,
    pub subscription_status: Option<String>,
}

impl TenantSettings {
    /// Merge a patch into these settings.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(ai_provider) = patch.ai_provider {
            self.ai_provider = ai_provider;
        }
        if let Some(enable_analytics) = patch.enable_analytics {
            self.enable_analytics = enable_analytics;
        }
        if let Some(max_products) = patch.max_products {
            self.max_products = max_products;
        }
        if let Some(plan) = patch.plan {
            self.plan = plan;
        }
        if let Some(subscription_status) = patch.subscription_status {
            self.subscription_status = Some(subscription_status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TenantSettings::default();
        assert_eq!(settings.ai_provider, "local");
        assert!(settings.enable_analytics);
        assert_eq!(settings.max_products, 100);
        assert_eq!(settings.plan, "free");
        assert_eq!(settings.subscription_status, None);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut settings = TenantSettings::default();
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"plan":"pro"}"#).expect("deserialize");
        settings.apply(patch);

        assert_eq!(settings.plan, "pro");
        // Untouched fields keep their values
        assert_eq!(settings.ai_provider, "local");
        assert!(settings.enable_analytics);
    }

    #[test]
    fn test_patch_unknown_keys_ignored() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"plan":"enterprise","theme":"dark"}"#)
                .expect("deserialize");
        let mut settings = TenantSettings::default();
        settings.apply(patch);
        assert_eq!(settings.plan, "enterprise");
    }

    #[test]
    fn test_subscription_status_round_trip() {
        let mut settings = TenantSettings::default();
        settings.apply(SettingsPatch {
            subscription_status: Some("active".to_string()),
            ..SettingsPatch::default()
        });
        let value = serde_json::to_value(&settings).expect("serialize");
        assert_eq!(value["subscriptionStatus"], "active");

        // None is omitted entirely
        let value = serde_json::to_value(TenantSettings::default()).expect("serialize");
        assert!(value.get("subscriptionStatus").is_none());
    }
}
