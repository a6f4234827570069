use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::health;
use super::middleware::{
    logging_middleware, security::MAX_BODY_SIZE, security_headers_middleware,
};
use super::routes;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(routes::create_routes_router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
