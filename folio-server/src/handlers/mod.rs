//! Request handlers

mod books;
mod sync;

pub use books::*;
pub use sync::*;

use axum::response::Html;
use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// The gallery page
pub async fn gallery() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
