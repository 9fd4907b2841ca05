//! Media-stream WebSocket handler

use axum::{
    Extension,
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::core::relay::{CallSession, CallSlot, relay_session};
use crate::state::AppState;

/// Maximum WebSocket frame size (1 MB)
const MAX_WS_FRAME_SIZE: usize = 1024 * 1024;

/// Maximum WebSocket message size (1 MB)
const MAX_WS_MESSAGE_SIZE: usize = 1024 * 1024;

/// Media-stream WebSocket handler
///
/// Upgrades the connection and bridges it to a new realtime session. The
/// [`CallSlot`] is injected by the call-limit middleware and is held until
/// the relay ends.
pub async fn media_stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Extension(slot): Extension<CallSlot>,
) -> Response {
    info!(
        session_id = %slot.session_id(),
        "Media stream connection upgrade requested"
    );

    let failed_session_id = slot.session_id().to_string();
    ws.max_frame_size(MAX_WS_FRAME_SIZE)
        .max_message_size(MAX_WS_MESSAGE_SIZE)
        .on_failed_upgrade(move |e| {
            error!(session_id = %failed_session_id, "Media stream upgrade failed: {}", e);
        })
        .on_upgrade(move |socket| handle_media_stream(socket, state, slot))
}

/// Run one call: attach the telephony leg, dial the realtime leg, relay.
async fn handle_media_stream(socket: WebSocket, state: Arc<AppState>, slot: CallSlot) {
    let session = CallSession::new(slot.session_id());
    session.mark_telephony_ready(socket);
    info!(session_id = %session.id(), "Telephony leg connected");

    // On failure the session is dropped here, which closes the telephony socket.
    if let Err(e) = state.realtime.connect(&session).await {
        error!(session_id = %session.id(), "Realtime leg not established: {}", e);
        return;
    }

    match relay_session(&session).await {
        Ok(report) => info!(
            session_id = %session.id(),
            stream_sid = %session.stream_sid(),
            telephony_to_ai = report.telephony_to_ai.forwarded,
            ai_to_telephony = report.ai_to_telephony.forwarded,
            telephony_exit = ?report.telephony_to_ai.exit,
            ai_exit = ?report.ai_to_telephony.exit,
            "Call ended"
        ),
        Err(e) => error!(session_id = %session.id(), "Relay not started: {}", e),
    }

    drop(slot);
}
