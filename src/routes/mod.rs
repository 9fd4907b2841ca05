//! Router assembly.

pub mod media_stream;

use axum::{Router, routing::get};
use http::HeaderValue;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::api::home_page;
use crate::state::AppState;

/// Build the complete application: public page plus media-stream endpoint,
/// wrapped in security headers.
pub fn create_app(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/", get(home_page))
        .layer(TraceLayer::new_for_http());

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    public_routes
        .merge(media_stream::create_media_stream_router(state.clone()))
        .with_state(state)
        .layer(security_headers)
}
