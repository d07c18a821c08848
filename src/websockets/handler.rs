use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::Response,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::shared::AppState;

use super::socket::Connection;

/// WebSocket endpoint for a room's real-time channel
///
/// GET /ws/{room_id}. The room does not have to exist yet: clients may open
/// their channel before the room is created, and the subscription simply
/// waits for the first notification.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(app_state): State<AppState>,
) -> Response {
    info!(room_id = %room_id, "WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, room_id, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    room_id: String,
    app_state: AppState,
) {
    // Outbound channel (notifier -> this client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    let conn_id = app_state.notifier.subscribe(&room_id, outbound_sender);

    info!(
        room_id = %room_id,
        conn_id = %conn_id,
        "WebSocket connection established"
    );

    let connection = Connection::new(room_id.clone(), Box::new(socket), outbound_receiver);

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(
                room_id = %room_id,
                conn_id = %conn_id,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                room_id = %room_id,
                conn_id = %conn_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup; a broadcast racing this removal prunes the subscriber itself
    app_state.notifier.unsubscribe(&room_id, conn_id);
}
