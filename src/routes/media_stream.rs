//! Media-stream WebSocket route configuration

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::telephony::twilio::MEDIA_STREAM_PATH;
use crate::handlers::media_stream_handler;
use crate::middleware::call_limit_middleware;
use crate::state::AppState;

/// Create the media-stream WebSocket router
///
/// # Endpoint
///
/// `GET /ws` - WebSocket upgrade for the Twilio media stream
///
/// Layer order (outer to inner): trace -> call_limit -> handler. While a
/// call is active every further upgrade is answered with `409 Conflict`.
pub fn create_media_stream_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(MEDIA_STREAM_PATH, get(media_stream_handler))
        .layer(middleware::from_fn_with_state(state, call_limit_middleware))
        .layer(TraceLayer::new_for_http())
}
