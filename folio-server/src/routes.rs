//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Origins allowed when FOLIO_CORS_ORIGINS is unset
const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    // FOLIO_CORS_ORIGINS can be comma-separated list of origins, or "*" for any
    let cors = match std::env::var("FOLIO_CORS_ORIGINS").ok() {
        Some(origins) if origins == "*" => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(parse_origins(origins.split(','))))
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(AllowOrigin::list(parse_origins(DEV_ORIGINS)))
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let api_routes = Router::new()
        .route("/books", get(handlers::list_books))
        .route("/view", put(handlers::set_view))
        .route("/view/toggle", post(handlers::toggle_view))
        .route("/pages/next", post(handlers::next_page))
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .route("/", get(handlers::gallery))
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn parse_origins<'a>(origins: impl IntoIterator<Item = &'a str>) -> Vec<HeaderValue> {
    origins
        .into_iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}
