//! Twilio telephony provider.
//!
//! Outbound calls are placed through the REST Calls resource with inline
//! TwiML. When the callee answers, Twilio opens a bidirectional media stream
//! to `wss://<domain>/ws` carrying base64 G.711 u-law audio at 8kHz.

mod client;
mod config;
mod messages;
pub mod twiml;

pub use client::TwilioClient;
pub use config::{MEDIA_STREAM_PATH, TWILIO_API_URL, TwilioConfig};
pub use messages::{
    ApiErrorBody, CallResource, CreateCallParams, MEDIA_EVENT, MediaChunk, MediaEvent,
    OutboundMediaMessage, OutboundMediaPayload, START_EVENT, STOP_EVENT, StartEvent,
    StreamEventEnvelope,
};
