//! Audio frame codec.
//!
//! Pure translation between the Twilio media-stream schema and the OpenAI
//! Realtime schema. Audio is base64 G.711 u-law on both wires, so payloads
//! are copied verbatim and only the envelopes change.
//!
//! Parsing is two-staged: the envelope only reads the discriminator, and the
//! recognized tags (`start`, `media`, `response.audio.delta`) are re-parsed
//! with their specific schema. Absent or `null` string fields read as empty,
//! so `{"event":"start"}` yields an empty stream sid. A recognized tag whose
//! body has a field of the wrong type is an error, and an unrecognized tag is
//! returned as `Other` for logging.

use thiserror::Error;

use crate::core::realtime::openai::{
    AUDIO_DELTA_EVENT, AudioDeltaEvent, ClientEvent, ServerEventEnvelope,
};
use crate::core::telephony::twilio::{
    MEDIA_EVENT, MediaEvent, OutboundMediaMessage, START_EVENT, STOP_EVENT, StartEvent,
    StreamEventEnvelope,
};

/// Errors produced while translating frames.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The frame is not a JSON object with the expected envelope
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// A recognized event carried an ill-typed field
    #[error("Malformed '{event}' event: {reason}")]
    MalformedEvent { event: String, reason: String },

    /// An outbound frame could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Decoded frame from the telephony leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelephonyEvent {
    Start { stream_sid: String },
    Media { payload: String },
    Stop,
    Other { event: String },
}

/// Decoded frame from the realtime leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiEvent {
    AudioDelta { delta: String },
    Other { event_type: String },
}

fn malformed(event: &str, err: serde_json::Error) -> CodecError {
    CodecError::MalformedEvent {
        event: event.to_string(),
        reason: err.to_string(),
    }
}

/// Decode one telephony text frame.
pub fn decode_telephony(text: &str) -> CodecResult<TelephonyEvent> {
    let envelope: StreamEventEnvelope =
        serde_json::from_str(text).map_err(|e| CodecError::InvalidEnvelope(e.to_string()))?;

    match envelope.event.as_str() {
        MEDIA_EVENT => {
            let media: MediaEvent =
                serde_json::from_str(text).map_err(|e| malformed(MEDIA_EVENT, e))?;
            Ok(TelephonyEvent::Media {
                payload: media.media.payload,
            })
        }
        START_EVENT => {
            let start: StartEvent =
                serde_json::from_str(text).map_err(|e| malformed(START_EVENT, e))?;
            Ok(TelephonyEvent::Start {
                stream_sid: start.stream_sid,
            })
        }
        STOP_EVENT => Ok(TelephonyEvent::Stop),
        _ => Ok(TelephonyEvent::Other {
            event: envelope.event,
        }),
    }
}

/// Decode one realtime text frame.
pub fn decode_ai(text: &str) -> CodecResult<AiEvent> {
    let envelope: ServerEventEnvelope =
        serde_json::from_str(text).map_err(|e| CodecError::InvalidEnvelope(e.to_string()))?;

    if envelope.event_type == AUDIO_DELTA_EVENT {
        let delta: AudioDeltaEvent =
            serde_json::from_str(text).map_err(|e| malformed(AUDIO_DELTA_EVENT, e))?;
        return Ok(AiEvent::AudioDelta { delta: delta.delta });
    }

    Ok(AiEvent::Other {
        event_type: envelope.event_type,
    })
}

/// `input_audio_buffer.append` frame for the realtime leg.
pub fn encode_audio_append(payload: &str) -> CodecResult<String> {
    serde_json::to_string(&ClientEvent::audio_append(payload))
        .map_err(|e| CodecError::Serialization(e.to_string()))
}

/// `media` frame for the telephony leg.
pub fn encode_media(stream_sid: &str, payload: &str) -> CodecResult<String> {
    serde_json::to_string(&OutboundMediaMessage::new(stream_sid, payload))
        .map_err(|e| CodecError::Serialization(e.to_string()))
}
