//! OAuth token record and its expiry arithmetic.

use chrono::{DateTime, Duration, Utc};

/// Fallback token lifetime when the provider omits `expires_in`.
const DEFAULT_LIFETIME_SECS: i64 = 3600;
/// Provider-reported lifetimes below this are distrusted and floored.
const MIN_LIFETIME_SECS: i64 = 60;
/// Margin subtracted so a token we consider valid still has real remaining
/// lifetime at the provider when the proxied call lands.
const SAFETY_MARGIN_SECS: i64 = 30;

/// Access/refresh token pair for one tenant.
///
/// Overwritten wholesale on every successful exchange or refresh; never
/// persisted beyond the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Build a record from a provider grant issued at `issued_at`.
    ///
    /// `expires_at` is `issued_at + (max(60, expires_in) - 30)` seconds, with
    /// `expires_in` defaulting to one hour when the provider omits it.
    #[must_use]
    pub fn from_grant(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let lifetime = expires_in
            .unwrap_or(DEFAULT_LIFETIME_SECS)
            .max(MIN_LIFETIME_SECS)
            - SAFETY_MARGIN_SECS;

        Self {
            access_token,
            refresh_token,
            expires_at: issued_at + Duration::seconds(lifetime),
        }
    }

    /// Whether the access token is still usable at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl std::fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRecord")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_expiry_uses_reported_lifetime_minus_margin() {
        let record =
            TokenRecord::from_grant("at".to_string(), None, Some(600), issued_at());
        assert_eq!(record.expires_at, issued_at() + Duration::seconds(570));
    }

    #[test]
    fn test_expiry_defaults_to_one_hour() {
        let record = TokenRecord::from_grant("at".to_string(), None, None, issued_at());
        assert_eq!(record.expires_at, issued_at() + Duration::seconds(3570));
    }

    #[test]
    fn test_expiry_floors_short_lifetimes() {
        // 5s reported -> floored to 60s -> 30s after margin
        let record =
            TokenRecord::from_grant("at".to_string(), None, Some(5), issued_at());
        assert_eq!(record.expires_at, issued_at() + Duration::seconds(30));
    }

    #[test]
    fn test_validity_window() {
        let record =
            TokenRecord::from_grant("at".to_string(), None, Some(600), issued_at());
        assert!(record.is_valid_at(issued_at()));
        assert!(record.is_valid_at(issued_at() + Duration::seconds(569)));
        assert!(!record.is_valid_at(issued_at() + Duration::seconds(570)));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let record = TokenRecord::from_grant(
            "super-secret-access".to_string(),
            Some("super-secret-refresh".to_string()),
            Some(600),
            issued_at(),
        );
        let debug = format!("{record:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-access"));
        assert!(!debug.contains("super-secret-refresh"));
    }
}
