//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Command, ConnectionId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives notifications from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames addressed to this connection
/// * `sender` - WebSocket sink to send frames to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Decode one text frame into a validated command.
fn parse_command(text: &str) -> Result<Command, String> {
    let event: ClientEvent = serde_json::from_str(text).map_err(|e| e.to_string())?;
    Command::try_from(event).map_err(|e| e.to_string())
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive notifications
    let (tx, rx) = mpsc::unbounded_channel();
    state.dispatcher.connect(connection, tx).await;

    let dispatcher = state.dispatcher.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let command = match parse_command(text.as_str()) {
                        Ok(command) => command,
                        Err(e) => {
                            tracing::warn!("Dropping malformed event from {}: {}", connection, e);
                            continue;
                        }
                    };
                    let name = command.name();
                    if let Err(e) = dispatcher.dispatch(connection, command).await {
                        tracing::warn!("Dropping '{}' from {}: {}", name, connection, e);
                    }
                }
                Message::Binary(data) => {
                    tracing::warn!(
                        "Dropping binary frame ({} bytes) from {}",
                        data.len(),
                        connection
                    );
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.dispatcher.disconnect(connection).await;
}
