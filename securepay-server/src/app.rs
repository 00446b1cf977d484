//! Router assembly for the payment server.
//!
//! Combines the payment API, a health endpoint, and the static payment page
//! behind permissive CORS and HTTP tracing.

use std::path::Path;

use axum::http::Method;
use axum::{Json, Router};
use securepay_http::server::{ApiState, payment_router};
use tower_http::cors;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the full application router.
///
/// Requests that match no API route are served from `static_dir`, with
/// `index.html` answering `/`.
pub fn app(state: ApiState, static_dir: &Path) -> Router {
    Router::new()
        .merge(payment_router(state))
        .route("/health", axum::routing::get(health))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(cors::Any),
        )
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
