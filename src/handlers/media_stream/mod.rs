//! Twilio media-stream WebSocket handler
//!
//! Twilio opens this socket once the outbound call is answered (the TwiML
//! attached to the call points its `<Stream>` here).
//!
//! # Lifecycle
//!
//! 1. The call-limit middleware admits the upgrade or answers `409 Conflict`
//! 2. The upgraded socket becomes the telephony leg of a fresh session
//! 3. The realtime leg is dialed and configured
//! 4. The relay runs until either leg ends, then the call slot is released
//!
//! # Protocol
//!
//! ## Twilio → Server
//!
//! - **connected**: socket open (logged)
//! - **start**: carries the `streamSid` used to address outbound audio
//! - **media**: base64 u-law audio, forwarded to the realtime leg
//! - **stop**: call ended (logged)
//!
//! ## Server → Twilio
//!
//! - **media**: synthesized audio from the realtime leg

mod handler;

pub use handler::media_stream_handler;
