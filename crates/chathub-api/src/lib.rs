//! # chathub-api
//!
//! HTTP layer for ChatHub built on Axum.
//!
//! Provides the WebSocket chat endpoint, health and presence REST routes,
//! CORS and request logging middleware, and the shared application state.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
