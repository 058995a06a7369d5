//! WebSocket upgrade handlers and the per-connection socket loop.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info};

use chathub_core::types::id::UserId;
use chathub_realtime::message::codec;

use crate::state::AppState;

/// Query parameters accepted by the WebSocket endpoint.
#[derive(Debug, Default, serde::Deserialize)]
pub struct WsQuery {
    /// Caller-supplied identity id.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// GET /ws/chat?userId={id}
///
/// WebSocket upgrade with the identity supplied in the query string.
pub async fn upgrade_with_query(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Response {
    let user_id = query.user_id.as_deref().and_then(parse_user_id);
    ws.on_upgrade(move |socket| run_connection(state, user_id, socket))
}

/// GET /ws/chat/{user_id}
///
/// WebSocket upgrade with the identity supplied as a path segment.
pub async fn upgrade_with_path(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = parse_user_id(&user_id);
    ws.on_upgrade(move |socket| run_connection(state, user_id, socket))
}

/// Lenient identity parsing: anything non-numeric means a guest
/// connection, never a rejected upgrade.
fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.trim().parse::<UserId>().ok()
}

/// Drives one established socket: registers the session, forwards queued
/// frames out, and feeds inbound text through the lifecycle manager.
async fn run_connection(state: AppState, user_id: Option<UserId>, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (session, mut outbound_rx) = match state.engine.lifecycle.connect(user_id).await {
        Ok(pair) => pair,
        Err(e) => {
            // Registration refused; drop only this connection.
            error!(error = %e, "WebSocket registration failed");
            let _ = ws_tx.close().await;
            return;
        }
    };

    info!(
        session_id = %session.id,
        user_id = %session.user_id,
        "WebSocket connection established"
    );

    // Forward queued frames to the socket, serializing once per frame.
    let writer_session = session.clone();
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            let text = match codec::encode_frame(&frame) {
                Ok(text) => text,
                Err(e) => {
                    error!(
                        session_id = %writer_session.id,
                        error = %e,
                        "Dropping unencodable frame"
                    );
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut shutdown_rx = state.engine.shutdown_receiver();
    let mut errored = false;

    loop {
        tokio::select! {
            incoming = ws_rx.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    state.engine.lifecycle.inbound(&session, text.as_str()).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {
                    // Binary, ping, and pong frames carry no chat payload.
                }
                Some(Err(e)) => {
                    state
                        .engine
                        .lifecycle
                        .connection_error(&session, &e.to_string());
                    errored = true;
                    break;
                }
            },
            _ = shutdown_rx.recv() => break,
        }
    }

    outbound_task.abort();
    if !errored {
        state.engine.lifecycle.disconnect(&session);
    }

    debug!(session_id = %session.id, "Socket loop ended");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id_accepts_numbers() {
        assert_eq!(parse_user_id("42"), Some(UserId::new(42)));
        assert_eq!(parse_user_id(" 7 "), Some(UserId::new(7)));
        assert_eq!(parse_user_id("0"), Some(UserId::GUEST));
    }

    #[test]
    fn test_parse_user_id_collapses_garbage_to_guest() {
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("4.2"), None);
    }
}
