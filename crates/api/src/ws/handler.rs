use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::session::{BroadcastSession, SessionEnd};

/// HTTP handler that upgrades the connection to WebSocket.
///
/// A failed upgrade is logged and the connection dropped; the subscriber is
/// expected to reconnect on its own.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "WebSocket upgrade failed"))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run one broadcast session over an upgraded socket.
///
/// Splits the socket, watches the inbound half only to notice disconnects,
/// and lets [`BroadcastSession`] drive the outbound half. The session is
/// deregistered however the task ends.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let shutdown = state.sessions.register(conn_id.clone()).await;
    let (mut sink, mut stream) = socket.split();

    let reader_conn_id = conn_id.clone();
    let disconnected = async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(conn_id = %reader_conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    };

    let session = BroadcastSession::new(
        conn_id.clone(),
        state.engine.clone(),
        state.config.broadcast_interval(),
    );
    // Run on its own task so a panicking tick still reaches the cleanup below.
    let task = tokio::spawn(async move {
        let end = session.run(&mut sink, disconnected, shutdown).await;
        (end, sink)
    });

    match task.await {
        Ok((end, mut sink)) => {
            if end != SessionEnd::WriteFailed {
                let _ = sink.close().await;
            }
        }
        Err(e) => {
            tracing::error!(conn_id = %conn_id, error = %e, "Broadcast session task failed");
        }
    }
    state.sessions.remove(&conn_id).await;
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
