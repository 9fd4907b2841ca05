//! Mock provider servers for integration tests
//!
//! - WebSocket: OpenAI Realtime (records the handshake and every frame the
//!   relay sends, and plays back frames pushed by the test)
//! - Telephony: a Twilio media-stream client driving the server's `/ws`

// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod realtime_mock;
pub mod twilio_client;

pub use realtime_mock::{Handshake, MockEvent, MockRealtimeServer};
pub use twilio_client::TwilioStreamClient;
