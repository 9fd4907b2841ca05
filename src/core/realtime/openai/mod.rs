//! OpenAI Realtime API module.
//!
//! This module provides the realtime leg of a bridged phone call using
//! OpenAI's Realtime API.
//!
//! # Session profile
//!
//! - Server-side VAD turn detection
//! - G.711 u-law audio at 8kHz in both directions, matching Twilio media streams
//! - Text and audio response modalities
//!
//! # Supported Voices
//!
//! alloy, ash, ballad, coral, echo, sage, shimmer, verse
//!
//! # Example
//!
//! ```rust,ignore
//! use realtime_caller::core::realtime::{OpenAIRealtime, RealtimeConfig};
//!
//! let realtime = OpenAIRealtime::new(RealtimeConfig {
//!     api_key: "sk-...".to_string(),
//!     ..Default::default()
//! })?;
//!
//! // `session` already holds the accepted telephony socket
//! realtime.connect(&session).await?;
//! ```

mod client;
mod config;
mod messages;

pub use client::{OpenAIRealtime, RealtimeSocket};
pub use config::{
    DEFAULT_REALTIME_MODEL, G711_ULAW_FORMAT, Modality, OPENAI_BETA_HEADER_VALUE,
    OPENAI_REALTIME_URL, OpenAIRealtimeVoice,
};
pub use messages::{
    AUDIO_DELTA_EVENT, AudioDeltaEvent, ClientEvent, ServerEventEnvelope, SessionConfig,
    TurnDetection,
};
