//! Subscription plan limits.
//!
//! A pure mapping from plan name to a fixed capability/limit record. Unknown
//! plan names fall back to the `free` limits, so a tenant whose billing state
//! is out of sync never gains capabilities by accident.

use serde::Serialize;

/// Capability and quantity limits attached to a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    /// Upper bound on the `limit` query parameter of product listings.
    pub max_products_per_page: u32,
    /// Total product cap across the tenant; `-1` means unlimited.
    pub max_total_products: i64,
    /// Whether AI product enhancements are available.
    pub ai_enhancement: bool,
    /// Whether the analytics dashboard is available.
    pub analytics: bool,
    /// Whether widget customization is available.
    pub customization: bool,
    /// White-label branding; only present for enterprise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_label: Option<bool>,
    /// Direct API access; only present for enterprise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_access: Option<bool>,
}

impl PlanLimits {
    /// Limits for the `free` plan.
    pub const FREE: Self = Self {
        max_products_per_page: 12,
        max_total_products: 100,
        ai_enhancement: false,
        analytics: false,
        customization: false,
        white_label: None,
        api_access: None,
    };

    /// Limits for the `pro` plan.
    pub const PRO: Self = Self {
        max_products_per_page: 50,
        max_total_products: 1000,
        ai_enhancement: true,
        analytics: true,
        customization: true,
        white_label: None,
        api_access: None,
    };

    /// Limits for the `enterprise` plan.
    pub const ENTERPRISE: Self = Self {
        max_products_per_page: 100,
        max_total_products: -1,
        ai_enhancement: true,
        analytics: true,
        customization: true,
        white_label: Some(true),
        api_access: Some(true),
    };

    /// Look up the limits for a plan name. Unknown names get `free`.
    #[must_use]
    pub fn for_plan(plan: &str) -> Self {
        match plan {
            "pro" => Self::PRO,
            "enterprise" => Self::ENTERPRISE,
            _ => Self::FREE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_plans() {
        assert_eq!(PlanLimits::for_plan("free"), PlanLimits::FREE);
        assert_eq!(PlanLimits::for_plan("pro"), PlanLimits::PRO);
        assert_eq!(PlanLimits::for_plan("enterprise"), PlanLimits::ENTERPRISE);
    }

    #[test]
    fn test_unknown_plan_falls_back_to_free() {
        assert_eq!(PlanLimits::for_plan(""), PlanLimits::FREE);
        assert_eq!(PlanLimits::for_plan("platinum"), PlanLimits::FREE);
        assert_eq!(PlanLimits::for_plan("FREE"), PlanLimits::FREE);
        assert_eq!(PlanLimits::for_plan("Pro"), PlanLimits::FREE);
    }

    #[test]
    fn test_enterprise_extra_flags() {
        assert_eq!(PlanLimits::ENTERPRISE.white_label, Some(true));
        assert_eq!(PlanLimits::ENTERPRISE.api_access, Some(true));
        assert_eq!(PlanLimits::ENTERPRISE.max_total_products, -1);
    }

    #[test]
    fn test_serialized_shape() {
        let free = serde_json::to_value(PlanLimits::FREE).expect("serialize");
        assert_eq!(free["maxProductsPerPage"], 12);
        assert_eq!(free["aiEnhancement"], false);
        // Enterprise-only flags are omitted for lower tiers
        assert!(free.get("whiteLabel").is_none());

        let enterprise = serde_json::to_value(PlanLimits::ENTERPRISE).expect("serialize");
        assert_eq!(enterprise["whiteLabel"], true);
        assert_eq!(enterprise["apiAccess"], true);
    }
}
