//! Route definitions for the ChatHub HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket chat endpoint
//! lives at `/ws/chat`. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::http::HeaderValue;
use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(presence_routes());

    let ws_routes = Router::new()
        .route("/ws/chat", get(handlers::ws::upgrade_with_query))
        .route("/ws/chat/{user_id}", get(handlers::ws::upgrade_with_path));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Health check endpoints.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Presence endpoints.
fn presence_routes() -> Router<AppState> {
    Router::new().route("/presence/online", get(handlers::presence::online_users))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
