//! Twilio wire types.
//!
//! # Media streams
//!
//! Twilio sends JSON text frames tagged by `event`:
//! - connected - stream socket is open
//! - start - stream metadata, carries the `streamSid`
//! - media - one chunk of base64 u-law audio
//! - mark / dtmf - playback marks and key presses
//! - stop - the call ended
//!
//! Frames sent back to Twilio use the same envelope with event `media`.
//!
//! # REST
//!
//! The Calls resource answers with the created call, or with an error body
//! carrying `code` and `message`.

use serde::{Deserialize, Serialize};

use crate::utils::null_as_default;

/// `event` tag of the stream start frame.
pub const START_EVENT: &str = "start";

/// `event` tag of an audio frame.
pub const MEDIA_EVENT: &str = "media";

/// `event` tag of the stream stop frame.
pub const STOP_EVENT: &str = "stop";

// =============================================================================
// Media stream: inbound
// =============================================================================

/// Envelope of every inbound stream frame: only the discriminator and the
/// stream identifier are read.
///
/// Absent or `null` string fields read as empty in every inbound frame;
/// only a value of the wrong type is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamEventEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event: String,
    #[serde(rename = "streamSid", default)]
    pub stream_sid: Option<String>,
}

/// `start` frame.
#[derive(Debug, Clone, Deserialize)]
pub struct StartEvent {
    #[serde(rename = "streamSid", default, deserialize_with = "null_as_default")]
    pub stream_sid: String,
}

/// `media` frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEvent {
    #[serde(default)]
    pub sequence_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: MediaChunk,
    #[serde(default)]
    pub stream_sid: Option<String>,
}

/// Audio chunk inside a `media` frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaChunk {
    /// `inbound` or `outbound`
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub chunk: Option<String>,
    /// Milliseconds since the stream started
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Base64-encoded u-law audio
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: String,
}

// =============================================================================
// Media stream: outbound
// =============================================================================

/// Audio frame sent to Twilio for playback to the callee.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMediaMessage {
    pub event: &'static str,
    #[serde(rename = "streamSid")]
    pub stream_sid: String,
    pub media: OutboundMediaPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutboundMediaPayload {
    pub payload: String,
}

impl OutboundMediaMessage {
    pub fn new(stream_sid: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            event: MEDIA_EVENT,
            stream_sid: stream_sid.into(),
            media: OutboundMediaPayload {
                payload: payload.into(),
            },
        }
    }
}

// =============================================================================
// REST
// =============================================================================

/// Form body of a Calls `POST`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCallParams<'a> {
    #[serde(rename = "To")]
    pub to: &'a str,
    #[serde(rename = "From")]
    pub from: &'a str,
    #[serde(rename = "Twiml")]
    pub twiml: &'a str,
}

/// Created call resource (only the fields this server reads).
#[derive(Debug, Clone, Deserialize)]
pub struct CallResource {
    pub sid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body returned by the Twilio REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u32>,
    pub message: String,
}
