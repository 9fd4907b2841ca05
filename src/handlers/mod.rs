//! HTTP and WebSocket request handlers
//!
//! - `api` - Placeholder home page
//! - `media_stream` - Twilio media-stream WebSocket bridged to OpenAI Realtime

pub mod api;
pub mod media_stream;

pub use media_stream::media_stream_handler;
