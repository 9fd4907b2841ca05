//! OpenAI Realtime API WebSocket message types.
//!
//! Only the slice of the protocol that a phone bridge needs is modelled:
//!
//! Client events (sent to server):
//! - session.update - one-shot session configuration, sent before any audio
//! - input_audio_buffer.append - caller audio, one event per media frame
//!
//! Server events (received from server) are read through a two-stage parse:
//! the envelope only carries the `type` tag, and `response.audio.delta` is
//! re-parsed with [`AudioDeltaEvent`] to extract the payload. Every other
//! server event is observed for logging and never forwarded.

use serde::{Deserialize, Serialize};

use crate::utils::null_as_default;

/// Server event type carrying incremental synthesized audio.
pub const AUDIO_DELTA_EVENT: &str = "response.audio.delta";

// =============================================================================
// Session Configuration
// =============================================================================

/// Session configuration for OpenAI Realtime API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Turn detection configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_detection: Option<TurnDetection>,

    /// Input audio format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_audio_format: Option<String>,

    /// Output audio format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_audio_format: Option<String>,

    /// Voice for audio output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// System instructions for the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Response modalities (text, audio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<String>>,

    /// Temperature for response generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Turn detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnDetection {
    /// Server-side VAD
    #[serde(rename = "server_vad")]
    ServerVad {
        /// Activation threshold
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f32>,
        /// Audio prefix padding in ms
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix_padding_ms: Option<u32>,
        /// Silence duration in ms
        #[serde(default, skip_serializing_if = "Option::is_none")]
        silence_duration_ms: Option<u32>,
    },
}

impl TurnDetection {
    /// Server VAD with provider defaults for every tuning knob.
    pub fn server_vad() -> Self {
        TurnDetection::ServerVad {
            threshold: None,
            prefix_padding_ms: None,
            silence_duration_ms: None,
        }
    }
}

// =============================================================================
// Client Events (sent to server)
// =============================================================================

/// Client events sent to the OpenAI Realtime API.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Update session configuration
    #[serde(rename = "session.update")]
    SessionUpdate {
        /// Session configuration
        session: SessionConfig,
    },

    /// Append audio to input buffer
    #[serde(rename = "input_audio_buffer.append")]
    InputAudioBufferAppend {
        /// Base64-encoded audio data, forwarded as received
        audio: String,
    },
}

impl ClientEvent {
    /// Create an audio append event from an already base64-encoded payload.
    pub fn audio_append(payload: impl Into<String>) -> Self {
        ClientEvent::InputAudioBufferAppend {
            audio: payload.into(),
        }
    }
}

// =============================================================================
// Server Events (received from server)
// =============================================================================

/// Envelope of every server event: only the discriminator is read.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEventEnvelope {
    /// Event type tag, empty when absent or `null`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub event_type: String,
}

/// `response.audio.delta` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioDeltaEvent {
    /// Base64-encoded audio chunk, empty when absent or `null`
    #[serde(default, deserialize_with = "null_as_default")]
    pub delta: String,
}

// =============================================================================
// Tests
// =============================================================================
