//! Base types for the realtime (AI) leg of a call.
//!
//! The realtime leg is an outbound WebSocket to a speech-to-speech provider.
//! It is configured exactly once per call, right after the dial succeeds, and
//! the configuration is never renegotiated while the call is live.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while establishing the realtime leg.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The telephony leg has not been established for this session yet
    #[error("Telephony leg not ready")]
    TelephonyNotReady,
}

/// Result type for realtime operations.
pub type RealtimeResult<T> = Result<T, RealtimeError>;

// =============================================================================
// Configuration Types
// =============================================================================

/// Default system instructions given to the voice agent.
pub const DEFAULT_INSTRUCTIONS: &str =
    "You are making a phone call to place an order for a pizza. You love pineapple but not onions.";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Configuration for the realtime leg of a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Provider API key (sent as a bearer credential)
    pub api_key: String,

    /// Base WebSocket endpoint, without the model query parameter
    pub url: String,

    /// Model identifier
    pub model: String,

    /// Voice used for synthesized speech
    pub voice: String,

    /// System instructions for the agent
    pub instructions: String,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url: super::openai::OPENAI_REALTIME_URL.to_string(),
            model: super::openai::DEFAULT_REALTIME_MODEL.to_string(),
            voice: super::openai::OpenAIRealtimeVoice::default()
                .as_str()
                .to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RealtimeConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.url, "wss://api.openai.com/v1/realtime");
        assert_eq!(config.model, "gpt-4o-realtime-preview-2024-12-17");
        assert_eq!(config.voice, "echo");
        assert!(config.instructions.contains("pizza"));
        assert_eq!(config.temperature, 0.8);
    }

    #[test]
    fn test_error_display() {
        let err = RealtimeError::ConnectionFailed("test".to_string());
        assert!(err.to_string().contains("Connection failed"));

        let err = RealtimeError::TelephonyNotReady;
        assert_eq!(err.to_string(), "Telephony leg not ready");
    }
}
