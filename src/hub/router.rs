//! Inbound message routing
//!
//! Single decode/validate/dispatch path for everything a connection sends.
//! The sender identity on the wire is never trusted: every envelope (and,
//! for draws, the element inside it) gets the connection's server-assigned
//! user id before it is stored or fanned out.

use tracing::{debug, warn};

use super::client::Client;
use super::room::Room;
use crate::models::Envelope;

/// Decode one inbound text frame and apply its room side effects.
///
/// Decode failures are logged and discarded; the connection stays open.
/// Server-originated tags (`sync`, `join`, `leave`, `userlist`) and unknown
/// tags arriving inbound are ignored as no-ops.
pub fn dispatch(room: &Room, client: &Client, text: &str) {
    let mut envelope: Envelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!("discarding malformed message from {}: {}", client.user_id, e);
            return;
        }
    };

    match &mut envelope {
        Envelope::Draw { user_id, data } => {
            *user_id = Some(client.user_id.clone());
            data.user_id = client.user_id.clone();
            room.append_element(data.clone());
        }
        Envelope::Cursor { user_id, .. } => {
            // Ephemeral: broadcast only, never persisted.
            *user_id = Some(client.user_id.clone());
        }
        Envelope::Clear { user_id } => {
            *user_id = Some(client.user_id.clone());
            room.clear();
        }
        _ => {
            debug!(
                "ignoring inbound message with server-only or unknown tag from {}",
                client.user_id
            );
            return;
        }
    }

    let payload = match serde_json::to_string(&envelope) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("failed to re-encode envelope: {}", e);
            return;
        }
    };

    // Clear reaches everyone so the sender's own canvas reconciles too;
    // draw and cursor echoes go to everyone but the sender.
    let exclude = match envelope {
        Envelope::Clear { .. } => None,
        _ => Some(client.id),
    };
    room.broadcast(&payload, exclude);
}
