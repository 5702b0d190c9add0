//! Wix Stores REST API client.
//!
//! Reads collections and products with a per-tenant bearer token and converts
//! the wire shapes into the normalized catalog types, so the widget sees the
//! same shape whether data came from Wix or from the mock generator.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;

use product_grid_core::{Category, Product};

use crate::config::WixConfig;
use crate::wix::WixError;

/// Client for the Wix Stores read endpoints.
#[derive(Clone)]
pub struct WixStoresClient {
    inner: Arc<WixStoresClientInner>,
}

struct WixStoresClientInner {
    client: reqwest::Client,
    api_base_url: String,
}

impl WixStoresClient {
    /// Create a new Stores API client.
    #[must_use]
    pub fn new(config: &WixConfig) -> Self {
        Self {
            inner: Arc::new(WixStoresClientInner {
                client: reqwest::Client::new(),
                api_base_url: config.api_base_url.clone(),
            }),
        }
    }

    /// List the site's collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-success.
    pub async fn list_collections(
        &self,
        access_token: &str,
        site_id: &str,
    ) -> Result<Vec<Category>, WixError> {
        let url = format!("{}/stores/v1/collections", self.inner.api_base_url);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(access_token)
            .header("wix-site-id", site_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WixError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CollectionsResponse = response.json().await?;
        Ok(body.collections.into_iter().map(Category::from).collect())
    }

    /// List products, optionally scoped to a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-success.
    pub async fn list_products(
        &self,
        access_token: &str,
        site_id: &str,
        limit: u32,
        offset: u32,
        collection_id: Option<&str>,
    ) -> Result<Vec<Product>, WixError> {
        let url = format!("{}/stores/v1/products", self.inner.api_base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(collection_id) = collection_id {
            query.push(("collectionId", collection_id.to_string()));
        }

        let response = self
            .inner
            .client
            .get(&url)
            .query(&query)
            .bearer_auth(access_token)
            .header("wix-site-id", site_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WixError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let category = collection_id.unwrap_or("all");
        let body: ProductsResponse = response.json().await?;
        Ok(body
            .products
            .into_iter()
            .map(|product| product.into_product(category))
            .collect())
    }
}

// =============================================================================
// Wire types and conversions
// =============================================================================

#[derive(Debug, Deserialize)]
struct CollectionsResponse {
    #[serde(default)]
    collections: Vec<WixCollection>,
}

#[derive(Debug, Deserialize)]
struct WixCollection {
    id: String,
    #[serde(default)]
    name: String,
}

impl From<WixCollection> for Category {
    fn from(collection: WixCollection) -> Self {
        Self {
            id: collection.id,
            name: collection.name,
            slug: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Vec<WixProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WixProduct {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price_data: Option<WixPriceData>,
    #[serde(default)]
    media: Option<WixMedia>,
    #[serde(default)]
    stock: Option<WixStock>,
    #[serde(default)]
    product_page_url: Option<WixPageUrl>,
}

#[derive(Debug, Deserialize)]
struct WixPriceData {
    #[serde(default)]
    price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WixMedia {
    #[serde(default)]
    main_media: Option<WixMainMedia>,
}

#[derive(Debug, Deserialize)]
struct WixMainMedia {
    #[serde(default)]
    image: Option<WixImage>,
}

#[derive(Debug, Deserialize)]
struct WixImage {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WixStock {
    #[serde(default)]
    in_stock: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct WixPageUrl {
    #[serde(default)]
    base: String,
    #[serde(default)]
    path: String,
}

impl WixProduct {
    fn into_product(self, category: &str) -> Product {
        let image = self
            .media
            .and_then(|media| media.main_media)
            .and_then(|main| main.image)
            .map(|image| image.url);
        let url = self
            .product_page_url
            .map(|page| format!("{}{}", page.base, page.path));

        Product {
            id: self.id,
            name: self.name,
            price: self
                .price_data
                .and_then(|data| data.price)
                .unwrap_or_default(),
            image,
            url,
            category: category.to_string(),
            in_stock: self.stock.and_then(|stock| stock.in_stock).unwrap_or(true),
            rating: None,
            reviews: None,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_conversion() {
        let raw = r#"{
            "id": "prod-1",
            "name": "Candle",
            "description": "Hand poured",
            "priceData": { "currency": "BRL", "price": 129 },
            "media": { "mainMedia": { "image": { "url": "https://img.example/1.jpg" } } },
            "stock": { "trackInventory": true, "inStock": false },
            "productPageUrl": { "base": "https://shop.example", "path": "/product/candle" }
        }"#;
        let wix: WixProduct = serde_json::from_str(raw).expect("deserialize");
        let product = wix.into_product("home");

        assert_eq!(product.id, "prod-1");
        assert_eq!(product.category, "home");
        assert_eq!(product.price, Decimal::new(129, 0));
        assert_eq!(product.image.as_deref(), Some("https://img.example/1.jpg"));
        assert_eq!(product.url.as_deref(), Some("https://shop.example/product/candle"));
        assert!(!product.in_stock);
        // Wix does not expose ratings; the widget treats these as absent
        assert_eq!(product.rating, None);
        assert_eq!(product.reviews, None);
    }

    #[test]
    fn test_sparse_product_defaults() {
        let wix: WixProduct = serde_json::from_str(r#"{"id":"p","name":"N"}"#)
            .expect("deserialize");
        let product = wix.into_product("all");

        assert_eq!(product.price, Decimal::ZERO);
        assert!(product.in_stock);
        assert_eq!(product.image, None);
        assert_eq!(product.url, None);
    }

    #[test]
    fn test_empty_collections_response() {
        let body: CollectionsResponse = serde_json::from_str("{}").expect("deserialize");
        assert!(body.collections.is_empty());
    }
}
