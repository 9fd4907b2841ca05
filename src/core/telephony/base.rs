//! Base traits and types for telephony providers.
//!
//! A telephony provider places the outbound call and, once the callee
//! answers, connects a bidirectional media stream back to this server.

use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while talking to the telephony provider's REST API.
#[derive(Debug, Error)]
pub enum TelephonyError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The HTTP request could not be sent or its body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider rejected the request
    #[error("Provider error ({status}): {message}")]
    ProviderError { status: u16, message: String },

    /// The provider answered with a body that could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for telephony operations.
pub type TelephonyResult<T> = Result<T, TelephonyError>;

// =============================================================================
// Call placement
// =============================================================================

/// Identifier assigned by the provider to a placed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCall {
    /// Provider call identifier (Twilio `CallSid`)
    pub call_sid: String,
    /// Provider-reported call status, e.g. `queued`
    pub status: Option<String>,
}

/// Places outbound calls whose answer opens a media stream to this server.
#[async_trait]
pub trait CallPlacer: Send + Sync {
    /// Originate a call to `to`.
    async fn place_call(&self, to: &str) -> TelephonyResult<PlacedCall>;
}
