//! Catalog types served to the widget.
//!
//! Both the live commerce proxy and the mock generator normalize into these
//! shapes, so the widget never needs to know which path produced its data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product category (Wix calls these collections).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// URL slug; the fixed fallback set carries one, live collections may not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Category {
    /// Create a category with a slug (used by the fallback set).
    #[must_use]
    pub fn new(id: &str, name: &str, slug: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: Some(slug.to_string()),
        }
    }
}

/// A product card as rendered by the widget.
///
/// `rating` and `reviews` are only populated by the mock generator; the Wix
/// Stores API does not expose them on the product resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub category: String,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
