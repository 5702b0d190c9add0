//! Widget script endpoint.
//!
//! The widget is a self-contained browser script compiled into the binary,
//! so the deployable artifact stays a single file.

use axum::http::header;
use axum::response::IntoResponse;

/// The widget source, embedded at compile time.
const WIDGET_SOURCE: &str = include_str!("../../static/widget.js");

/// Serve the widget script.
///
/// # Route
///
/// `GET /widget` and `GET /widget/mobile`
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        WIDGET_SOURCE,
    )
}
