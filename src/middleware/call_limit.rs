//! Call limit middleware for the media-stream endpoint
//!
//! Only one call is bridged at a time. A media-stream upgrade arriving while
//! a call is active is rejected with `409 Conflict` before the upgrade
//! happens, so the active session is never touched.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use realtime_caller::middleware::call_limit_middleware;
//!
//! let app = Router::new()
//!     .route("/ws", get(media_stream_handler))
//!     .layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         call_limit_middleware,
//!     ));
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::core::relay::RegistryError;
use crate::state::AppState;

/// Middleware that admits at most one active call.
///
/// On admission the [`CallSlot`](crate::core::relay::CallSlot) is injected as
/// a request extension; the handler keeps it alive for the whole call.
/// Requests that are not WebSocket upgrades pass through untouched.
pub async fn call_limit_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let is_ws_upgrade = request
        .headers()
        .get("upgrade")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("websocket"))
        .unwrap_or(false);

    if !is_ws_upgrade {
        return next.run(request).await;
    }

    match state.sessions.try_admit() {
        Ok(slot) => {
            request.extensions_mut().insert(slot);
            next.run(request).await
        }
        Err(RegistryError::AlreadyActive { active, capacity }) => {
            tracing::warn!(
                active,
                capacity,
                "Rejecting media stream: a call is already active"
            );
            (StatusCode::CONFLICT, "A call is already active.").into_response()
        }
    }
}
