//! Site identifier newtype.
//!
//! Every piece of per-tenant state is keyed by the Wix site id. The newtype
//! prevents accidentally mixing site ids with instance ids or other strings.

use serde::{Deserialize, Serialize};

/// Sentinel tenant used when a request carries no site id (e.g. an OAuth
/// callback whose `state` parameter was missing or malformed).
const GLOBAL_SITE: &str = "global";

/// Identifier of one installed instance of the app on a customer's site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Create a new site id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The `"global"` sentinel tenant.
    #[must_use]
    pub fn global() -> Self {
        Self(GLOBAL_SITE.to_string())
    }

    /// Whether this is the sentinel tenant.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL_SITE
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SiteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
