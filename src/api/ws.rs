//! WebSocket endpoint forwarding broadcast frames to clients

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tracing::debug;

use super::state::AppState;
use crate::infrastructure::broadcast::BroadcastFrame;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let rx = state.broadcaster.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

/// Pump broadcast frames to the client until either side goes away
///
/// Inbound messages are ignored; the socket is push-only. A lagged
/// receiver skips the missed frames and keeps going.
async fn handle_socket(mut socket: WebSocket, mut rx: Receiver<BroadcastFrame>) {
    debug!("WebSocket client connected");

    loop {
        tokio::select! {
            frame = rx.recv() => match frame {
                Ok(frame) => {
                    let Ok(text) = serde_json::to_string(&frame) else {
                        continue;
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "WebSocket client lagged, frames dropped");
                }
                Err(RecvError::Closed) => break,
            },
            message = socket.recv() => match message {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
        }
    }

    debug!("WebSocket client disconnected");
}
