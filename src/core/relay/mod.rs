//! Session relay between the telephony and realtime legs.
//!
//! - [`codec`] translates frames between the two JSON schemas
//! - [`session`] holds the legs of one call
//! - [`registry`] admits at most one active call
//! - [`engine`] runs the two pumps until either leg ends

pub mod codec;
pub mod engine;
pub mod frame;
pub mod registry;
mod session;

use axum::extract::ws::WebSocket;

use crate::core::realtime::RealtimeSocket;

pub use codec::{AiEvent, CodecError, CodecResult, TelephonyEvent};
pub use engine::{
    Direction, Leg, PumpExit, PumpReport, RelayError, RelayReport, RelayResult, relay_session,
};
pub use frame::{FrameKind, WsFrame};
pub use registry::{CallSlot, MAX_ACTIVE_CALLS, RegistryError, SessionRegistry};
pub use session::Session;

/// Session of a live call: Twilio media stream on one side, OpenAI Realtime
/// on the other.
pub type CallSession = Session<WebSocket, RealtimeSocket>;
