//! Realtime (AI) leg of a bridged call.
//!
//! # Supported Providers
//!
//! - **OpenAI Realtime API** - speech-to-speech over WebSocket
//!
//! The provider socket is dialed once per call by the media-stream handler,
//! configured with a single `session.update`, and then handed to the relay
//! engine together with the telephony socket.

mod base;
pub mod openai;

pub use base::{
    DEFAULT_INSTRUCTIONS, DEFAULT_TEMPERATURE, RealtimeConfig, RealtimeError, RealtimeResult,
};
pub use openai::{
    DEFAULT_REALTIME_MODEL, OPENAI_REALTIME_URL, OpenAIRealtime, OpenAIRealtimeVoice,
    RealtimeSocket,
};
