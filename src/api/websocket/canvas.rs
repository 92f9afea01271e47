//! Canvas WebSocket handler
//!
//! Owns a connection's whole lifecycle: handshake, join flow (sync unicast,
//! join/userlist notices), the inbound/outbound task pair, and teardown.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::OUTBOUND_QUEUE_CAPACITY;
use crate::api::server::AppState;
use crate::hub::{router, Client, Room};
use crate::models::Envelope;

/// Optional connect-time parameters supplied by the client
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// WebSocket upgrade for a specific room
pub async fn canvas_ws(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_canvas_ws(socket, state, room_id, params.user_id))
}

/// WebSocket upgrade without a room key; joins the configured default room
pub async fn canvas_ws_default(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let room_id = state.config.server.default_room.clone();
    ws.on_upgrade(move |socket| handle_canvas_ws(socket, state, room_id, params.user_id))
}

/// Drive one connection from join to teardown
async fn handle_canvas_ws(
    socket: WebSocket,
    state: AppState,
    room_id: String,
    user_id: Option<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(OUTBOUND_QUEUE_CAPACITY);

    let user_id = user_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_user_id);
    let color = state.palette.next_color().to_string();

    let room = state.hub.get_or_create(&room_id);
    let client = Arc::new(Client::new(user_id.clone(), color, tx));
    let client_id = client.id;

    // Join flow: membership insert, element snapshot, and sync enqueue are
    // one atomic step, so no concurrent draw can slip between the snapshot
    // and the sync — the joiner always sees sync first, then live traffic.
    room.join_with_sync(client.clone(), |elements| {
        match serde_json::to_string(&Envelope::sync(elements, &client.user_id, &client.color)) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!("failed to encode sync payload: {}", e);
                None
            }
        }
    });
    info!("client {} joined room {}", user_id, room.id());

    if let Ok(json) = serde_json::to_string(&Envelope::join(client.user_info())) {
        room.broadcast(&json, Some(client_id));
    }
    if let Ok(json) = serde_json::to_string(&Envelope::userlist(room.snapshot_roster())) {
        room.broadcast(&json, None);
    }

    // Outbound task: drain the queue onto the socket. Exits when the queue
    // is closed and drained, or unilaterally closes the stream on a write
    // error (the inbound read error then drives the shared teardown path).
    let outbound_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    // Inbound loop: decode and dispatch until the stream ends. This task
    // owns teardown.
    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => router::dispatch(&room, &client, &text),
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by axum; binary frames are not part of
            // the protocol.
            Ok(_) => {}
            Err(e) => {
                debug!("websocket read error for {}: {}", user_id, e);
                break;
            }
        }
    }

    teardown(&room, &client, outbound_task).await;
    info!("client {} left room {}", user_id, room.id());
}

/// Tear down a connection, in order: flag + queue closure in one critical
/// section, then membership removal, then transport close (the outbound task
/// drains and exits), then leave/roster notices (the leaver is already gone
/// from membership, so nobody is excluded).
async fn teardown(room: &Room, client: &Client, outbound_task: JoinHandle<()>) {
    client.close();
    room.leave(client.id);
    let _ = outbound_task.await;

    if let Ok(json) = serde_json::to_string(&Envelope::leave(&client.user_id)) {
        room.broadcast(&json, None);
    }
    if let Ok(json) = serde_json::to_string(&Envelope::userlist(room.snapshot_roster())) {
        room.broadcast(&json, None);
    }
}

/// Generate an 8-character alphanumeric user id for clients that supply none
fn generate_user_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}
