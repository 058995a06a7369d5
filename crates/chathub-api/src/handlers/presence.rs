//! Presence handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, OnlineUsersResponse};
use crate::state::AppState;

/// GET /api/presence/online
///
/// The same distinct-id set the `ONLINE_USERS` frame carries, for clients
/// that want a snapshot before their first broadcast arrives.
pub async fn online_users(State(state): State<AppState>) -> Json<ApiResponse<OnlineUsersResponse>> {
    Json(ApiResponse::ok(OnlineUsersResponse {
        active_ids: state.engine.online_user_ids(),
    }))
}
