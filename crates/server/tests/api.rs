//! API tests driving the real router with in-memory state.
//!
//! The Wix endpoints are pointed at an unroutable origin; since no tenant in
//! these tests holds a token, every catalog read exercises the fallback path
//! without touching the network.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use product_grid_server::config::{AppConfig, WixConfig};
use product_grid_server::routes;
use product_grid_server::state::AppState;

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        environment: "test".to_string(),
        wix: WixConfig {
            app_id: "test-app".to_string(),
            app_secret: SecretString::from("6e9b2f1c-88a0-4c1d"),
            oauth_scopes: "stores:read".to_string(),
            api_base_url: "http://127.0.0.1:1".to_string(),
            oauth_base_url: "http://127.0.0.1:1".to_string(),
        },
        sentry_dsn: None,
    }
}

fn app() -> Router {
    routes::router(AppState::new(test_config()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request handled");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(path: &str, site_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(site_id) = site_id {
        builder = builder.header("x-wix-site-id", site_id);
    }
    builder.body(Body::empty()).expect("request built")
}

fn post_json(path: &str, site_id: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(site_id) = site_id {
        builder = builder.header("x-wix-site-id", site_id);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request built")
}

#[tokio::test]
async fn descriptor_lists_endpoints_and_plans() {
    let app = app();
    let (status, body) = send(&app, get("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Smart Product Grid Pro");
    assert_eq!(body["status"], "active");
    assert_eq!(body["endpoints"]["oauth_start"], "/oauth/start");
    assert_eq!(body["features"]["plans"], json!(["free", "pro", "enterprise"]));
}

#[tokio::test]
async fn health_and_alias() {
    let app = app();
    let (status, body) = send(&app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "test");

    let response = app
        .clone()
        .oneshot(get("/health", None))
        .await
        .expect("request handled");
    assert!(response.status().is_redirection());
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/api/health")
    );
}

#[tokio::test]
async fn oauth_start_redirects_to_installer() {
    let app = app();
    let response = app
        .clone()
        .oneshot(get("/oauth/start?siteId=s9", None))
        .await
        .expect("request handled");

    assert!(response.status().is_redirection());
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header");
    assert!(location.starts_with("http://127.0.0.1:1/installer/install?client_id=test-app"));
    assert!(location.contains("scope=stores%3Aread"));
    // The state parameter carries the site id as URL-encoded JSON
    assert!(location.contains("s9"));
}

#[tokio::test]
async fn auth_status_disconnected() {
    let app = app();
    let (status, body) = send(&app, get("/api/auth/status?siteId=s1", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["siteId"], "s1");
    assert_eq!(body["connected"], false);
    assert_eq!(body["expiresAt"], Value::Null);
}

#[tokio::test]
async fn categories_fall_back_to_fixed_set() {
    let app = app();
    let (status, body) = send(&app, get("/api/categories", Some("s1"))).await;

    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().expect("array body");
    assert_eq!(categories.len(), 8);
    assert_eq!(categories[0]["id"], "bestSelling");
    assert_eq!(categories[4]["id"], "electronics");
}

#[tokio::test]
async fn products_mock_page_for_free_tenant() {
    let app = app();
    let (status, body) = send(
        &app,
        get("/api/products/electronics?page=1&limit=3", Some("s1")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 3);

    let bases = ["TV Smart 55\"", "SoundBar Premium", "Roteador WiFi 6"];
    for (i, product) in products.iter().enumerate() {
        assert_eq!(product["id"], format!("electronics-1-{i}"));
        assert_eq!(product["category"], "electronics");
        let name = product["name"].as_str().expect("name");
        assert!(
            bases.iter().any(|base| name.starts_with(base)),
            "unexpected name {name}"
        );
    }

    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 3);
    assert_eq!(body["pagination"]["hasMore"], true);
    assert_eq!(body["planInfo"]["plan"], "free");
    assert_eq!(body["planInfo"]["limits"]["maxProductsPerPage"], 12);
}

#[tokio::test]
async fn products_limit_clamped_to_plan() {
    let app = app();
    let (_, body) = send(&app, get("/api/products?limit=500", Some("s1"))).await;

    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 12);
    // No category in the path means the default name list
    assert!(
        products[0]["name"]
            .as_str()
            .expect("name")
            .starts_with("Smartphone Pro Max")
    );
}

#[tokio::test]
async fn settings_merge_patch_and_usage() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json("/api/settings", Some("s1"), &json!({ "plan": "pro" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["settings"]["plan"], "pro");
    // Untouched defaults survive the patch
    assert_eq!(body["settings"]["aiProvider"], "local");

    // A product listing bumps the view counter reported under usage
    send(&app, get("/api/products", Some("s1"))).await;
    let (_, body) = send(&app, get("/api/settings", Some("s1"))).await;
    assert_eq!(body["settings"]["plan"], "pro");
    assert_eq!(body["limits"]["maxProductsPerPage"], 50);
    assert_eq!(body["usage"]["views"], 1);
}

#[tokio::test]
async fn uninstall_resets_settings_to_defaults() {
    let app = app();

    send(
        &app,
        post_json(
            "/webhooks/app-installed",
            None,
            &json!({ "siteId": "s1", "instanceId": "inst-1" }),
        ),
    )
    .await;
    send(
        &app,
        post_json("/api/settings", Some("s1"), &json!({ "plan": "enterprise" })),
    )
    .await;

    let (_, body) = send(&app, get("/api/settings?siteId=s1", None)).await;
    assert_eq!(body["settings"]["plan"], "enterprise");

    let (status, body) = send(
        &app,
        post_json("/webhooks/app-uninstalled", None, &json!({ "siteId": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // The tenant is recreated lazily with default settings
    let (_, body) = send(&app, get("/api/settings?siteId=s1", None)).await;
    assert_eq!(body["settings"]["plan"], "free");
    assert_eq!(body["settings"]["aiProvider"], "local");
    assert_eq!(body["usage"]["views"], 0);
}

#[tokio::test]
async fn subscription_webhook_updates_plan() {
    let app = app();
    send(&app, get("/api/settings", Some("s1"))).await; // create tenant

    send(
        &app,
        post_json(
            "/webhooks/subscription-changed",
            None,
            &json!({ "siteId": "s1", "planId": "pro", "status": "active" }),
        ),
    )
    .await;

    let (_, body) = send(&app, get("/api/settings", Some("s1"))).await;
    assert_eq!(body["settings"]["plan"], "pro");
    assert_eq!(body["settings"]["subscriptionStatus"], "active");
}

#[tokio::test]
async fn enhance_free_plan_gets_upsell() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/enhance-product",
            Some("s1"),
            &json!({ "product": { "rating": 4.2, "category": "electronics" } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isPremium"], true);
    let enhancement = body["enhancement"].as_str().expect("enhancement");
    assert!(enhancement.contains("Upgrade para Pro"));
}

#[tokio::test]
async fn enhance_pro_plan_gets_local_phrase() {
    let app = app();
    send(
        &app,
        post_json("/api/settings", Some("s1"), &json!({ "plan": "pro" })),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/enhance-product",
            Some("s1"),
            &json!({ "product": { "rating": 4.2, "reviews": 55, "category": "home" } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("isPremium").is_none());
    assert_eq!(body["aiProvider"], "local");
    let enhancement = body["enhancement"].as_str().expect("enhancement");
    assert!(!enhancement.contains("Upgrade para Pro"));
    assert!(!enhancement.is_empty());
}

#[tokio::test]
async fn analytics_recording_and_dashboard() {
    let app = app();

    for (event, instance) in [
        ("grid_rendered", "inst-1"),
        ("product_click", "inst-1"),
        ("grid_rendered", "inst-2"),
    ] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analytics")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-wix-site-id", "s1")
            .header("x-wix-instance-id", instance)
            .body(Body::from(
                json!({ "event": event, "data": { "source": "test" } }).to_string(),
            ))
            .expect("request built");
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    let (status, body) = send(&app, get("/api/analytics/dashboard", Some("s1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalEvents"], 3);
    assert_eq!(body["uniqueInstances"], 2);
    assert_eq!(body["topEvents"][0]["event"], "grid_rendered");
    assert_eq!(body["topEvents"][0]["count"], 2);
    // Recent activity is newest first
    assert_eq!(body["recentActivity"][0]["instanceId"], "inst-2");
    assert!(body["dateRange"]["from"].is_string());
}

#[tokio::test]
async fn analytics_are_isolated_per_tenant() {
    let app = app();
    send(
        &app,
        post_json("/api/analytics", Some("s1"), &json!({ "event": "view", "data": {} })),
    )
    .await;

    let (_, body) = send(&app, get("/api/analytics/dashboard", Some("s2"))).await;
    assert_eq!(body["totalEvents"], 0);
}

#[tokio::test]
async fn widget_script_is_served() {
    let app = app();
    let response = app
        .clone()
        .oneshot(get("/widget", None))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .expect("content type");
    assert!(content_type.contains("javascript"));

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    assert!(
        std::str::from_utf8(&bytes)
            .expect("utf8 body")
            .contains("SmartProductGrid")
    );
}

#[tokio::test]
async fn dashboard_page_is_html() {
    let app = app();
    let response = app
        .clone()
        .oneshot(get("/dashboard", None))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let html = std::str::from_utf8(&bytes).expect("utf8 body");
    assert!(html.contains("Smart Product Grid Pro"));
    assert!(html.contains("stores:read"));
}
