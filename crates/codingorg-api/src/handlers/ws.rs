//! WebSocket endpoint.
//!
//! Each socket gets a [`ChannelConnection`] registered with the shared
//! registry and a writer task forwarding its queued messages as text frames.
//! Client messages are answered with an `ack` event sent to that socket only.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use codingorg_events::{ChannelConnection, Connection, ConnectionRegistry, Delivery, DeliveryError};
use codingorg_models::Event;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Messages queued per socket; further sends fail until the writer catches up.
const OUTBOUND_BUFFER: usize = 256;

/// GET /ws - Upgrade to a WebSocket and join the event stream.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| run_socket(socket, state.registry))
}

async fn run_socket(socket: WebSocket, registry: Arc<ConnectionRegistry>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);
    let connection = Arc::new(ChannelConnection::new(tx));
    let connection_id = connection.id().clone();

    if let Err(e) = registry.register(connection.clone()).await {
        warn!(connection_id = %connection_id, error = %e, "failed to register connection");
        return;
    }
    let connections = registry.len().await;
    info!(
        connection_id = %connection_id,
        connections = connections,
        "client connected"
    );

    // Hands the sink back once every queued message is written.
    let writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if let Err(e) = sink.send(Message::Text(text)).await {
                debug!(error = %e, "websocket write failed");
                return None;
            }
        }
        Some(sink)
    });

    let mut failed = false;
    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Binary(data)) => match String::from_utf8(data) {
                Ok(text) => text,
                Err(_) => {
                    debug!(connection_id = %connection_id, "ignoring non-UTF8 binary frame");
                    continue;
                }
            },
            Ok(Message::Close(_)) => {
                debug!(connection_id = %connection_id, "client sent close frame");
                break;
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
            Err(e) => {
                warn!(connection_id = %connection_id, error = %e, "websocket receive failed");
                failed = true;
                break;
            }
        };

        debug!(connection_id = %connection_id, len = text.len(), "client message");
        let ack = Event::ack(format!("Received: {}", text));
        match registry.unicast(&ack, &connection_id).await {
            Delivery::Delivered => {}
            Delivery::NotRegistered => break,
            Delivery::Failed(DeliveryError::QueueFull) => {
                warn!(connection_id = %connection_id, "outbound queue full, dropping ack");
            }
            Delivery::Failed(e) => {
                warn!(connection_id = %connection_id, error = %e, "failed to acknowledge message");
                break;
            }
        }
    }

    registry.unregister(&connection_id).await;
    if !connection.close() {
        return;
    }
    let age = connection.age();
    drop(connection);

    if let Ok(Some(mut sink)) = writer.await {
        if failed {
            let frame = CloseFrame {
                code: close_code::ERROR,
                reason: "internal error".into(),
            };
            let _ = sink.send(Message::Close(Some(frame))).await;
        }
    }
    info!(
        connection_id = %connection_id,
        connected_secs = age.as_secs(),
        "client disconnected"
    );
}
