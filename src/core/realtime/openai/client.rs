//! OpenAI Realtime API connector.
//!
//! Dials the realtime endpoint for one call and performs the one-time session
//! configuration handshake. Once configured, the socket is stored in the call
//! [`Session`] and from then on belongs to the relay engine.
//!
//! # API Reference
//!
//! - Endpoint: `wss://api.openai.com/v1/realtime?model=<model>`
//! - Headers: `Authorization: Bearer <key>`, `OpenAI-Beta: realtime=v1`
//! - Protocol: WebSocket with JSON events

use futures_util::SinkExt;
use http::HeaderValue;
use http::header::{AUTHORIZATION, HeaderName};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{error, info, warn};
use url::Url;

use super::config::{
    DEFAULT_REALTIME_MODEL, G711_ULAW_FORMAT, Modality, OPENAI_BETA_HEADER_VALUE,
    OpenAIRealtimeVoice,
};
use super::messages::{ClientEvent, SessionConfig, TurnDetection};
use crate::core::realtime::base::{RealtimeConfig, RealtimeError, RealtimeResult};
use crate::core::relay::Session;

/// WebSocket connection to the realtime provider.
pub type RealtimeSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// OpenAI Realtime connector.
///
/// There is no retry or backoff: a failed dial aborts the call setup and the
/// telephony leg is dropped by the caller.
#[derive(Debug, Clone)]
pub struct OpenAIRealtime {
    config: RealtimeConfig,
    voice: OpenAIRealtimeVoice,
}

impl OpenAIRealtime {
    pub fn new(config: RealtimeConfig) -> RealtimeResult<Self> {
        if config.api_key.is_empty() {
            return Err(RealtimeError::AuthenticationFailed(
                "API key is required".to_string(),
            ));
        }

        let voice = OpenAIRealtimeVoice::from_str_or_default(&config.voice);
        if voice.as_str() != config.voice.to_lowercase() {
            warn!(
                "Unknown realtime voice '{}', falling back to '{}'",
                config.voice, voice
            );
        }

        Ok(Self { config, voice })
    }

    /// Get the configured voice.
    pub fn voice(&self) -> OpenAIRealtimeVoice {
        self.voice
    }

    /// Model identifier sent in the `model` query parameter.
    pub fn model(&self) -> &str {
        if self.config.model.is_empty() {
            DEFAULT_REALTIME_MODEL
        } else {
            &self.config.model
        }
    }

    /// Build the WebSocket URL with model parameter.
    pub fn build_ws_url(&self) -> RealtimeResult<Url> {
        Url::parse_with_params(&self.config.url, &[("model", self.model())]).map_err(|e| {
            RealtimeError::InvalidConfiguration(format!(
                "invalid realtime url '{}': {e}",
                self.config.url
            ))
        })
    }

    /// Build the authenticated handshake request.
    pub fn build_request(&self) -> RealtimeResult<Request> {
        let url = self.build_ws_url()?;
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| RealtimeError::InvalidConfiguration(e.to_string()))?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| RealtimeError::AuthenticationFailed(e.to_string()))?;
        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            HeaderName::from_static("openai-beta"),
            HeaderValue::from_static(OPENAI_BETA_HEADER_VALUE),
        );

        Ok(request)
    }

    /// Build the session configuration sent once per call.
    pub fn build_session_config(&self) -> SessionConfig {
        SessionConfig {
            turn_detection: Some(TurnDetection::server_vad()),
            input_audio_format: Some(G711_ULAW_FORMAT.to_string()),
            output_audio_format: Some(G711_ULAW_FORMAT.to_string()),
            voice: Some(self.voice.as_str().to_string()),
            instructions: Some(self.config.instructions.clone()),
            modalities: Some(vec![
                Modality::Text.as_str().to_string(),
                Modality::Audio.as_str().to_string(),
            ]),
            temperature: Some(self.config.temperature),
        }
    }

    /// Open the WebSocket to the provider.
    pub async fn dial(&self) -> RealtimeResult<RealtimeSocket> {
        let request = self.build_request()?;
        let (socket, _response) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(|e| RealtimeError::ConnectionFailed(e.to_string()))?;
        Ok(socket)
    }

    /// Establish the realtime leg for `session`.
    ///
    /// Requires the telephony leg to be ready. On success exactly one
    /// `session.update` has been written to the provider and the socket is
    /// stored in the session.
    pub async fn connect<T>(&self, session: &Session<T, RealtimeSocket>) -> RealtimeResult<()> {
        if !session.is_telephony_ready() {
            warn!(
                session_id = %session.id(),
                "Telephony leg not established yet, not dialing realtime provider"
            );
            return Err(RealtimeError::TelephonyNotReady);
        }

        let mut socket = self.dial().await.inspect_err(|e| {
            error!(session_id = %session.id(), "Error dialing realtime provider: {}", e);
        })?;
        info!(session_id = %session.id(), model = %self.model(), "Connected to OpenAI Realtime API");

        let update = ClientEvent::SessionUpdate {
            session: self.build_session_config(),
        };
        let json = serde_json::to_string(&update)
            .map_err(|e| RealtimeError::SerializationError(e.to_string()))?;

        socket
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| {
                error!(session_id = %session.id(), "Error writing session config: {}", e);
                RealtimeError::WebSocketError(e.to_string())
            })?;

        session.attach_ai(socket);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RealtimeConfig {
        RealtimeConfig {
            api_key: "sk-test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_api_key() {
        let result = OpenAIRealtime::new(RealtimeConfig::default());
        match result {
            Err(RealtimeError::AuthenticationFailed(msg)) => {
                assert!(msg.contains("API key is required"));
            }
            other => panic!("Expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_ws_url_carries_model() {
        let realtime = OpenAIRealtime::new(test_config()).unwrap();
        let url = realtime.build_ws_url().unwrap();
        assert_eq!(
            url.as_str(),
            "wss://api.openai.com/v1/realtime?model=gpt-4o-realtime-preview-2024-12-17"
        );
    }

    #[test]
    fn test_empty_model_uses_default() {
        let config = RealtimeConfig {
            model: String::new(),
            ..test_config()
        };
        let realtime = OpenAIRealtime::new(config).unwrap();
        assert_eq!(realtime.model(), DEFAULT_REALTIME_MODEL);

        let config = RealtimeConfig {
            model: "gpt-4o-mini-realtime-preview".to_string(),
            ..test_config()
        };
        let realtime = OpenAIRealtime::new(config).unwrap();
        assert_eq!(
            realtime.build_ws_url().unwrap().query(),
            Some("model=gpt-4o-mini-realtime-preview")
        );
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let config = RealtimeConfig {
            url: "not a url".to_string(),
            ..test_config()
        };
        let realtime = OpenAIRealtime::new(config).unwrap();
        assert!(matches!(
            realtime.build_ws_url(),
            Err(RealtimeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_request_headers() {
        let realtime = OpenAIRealtime::new(test_config()).unwrap();
        let request = realtime.build_request().unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer sk-test");
        assert_eq!(request.headers()["openai-beta"], "realtime=v1");
        assert_eq!(request.uri().host(), Some("api.openai.com"));
    }

    #[test]
    fn test_session_config_is_telephony_profile() {
        let realtime = OpenAIRealtime::new(test_config()).unwrap();
        let session = realtime.build_session_config();
        assert!(matches!(
            session.turn_detection,
            Some(TurnDetection::ServerVad { .. })
        ));
        assert_eq!(session.input_audio_format.as_deref(), Some("g711_ulaw"));
        assert_eq!(session.output_audio_format.as_deref(), Some("g711_ulaw"));
        assert_eq!(session.voice.as_deref(), Some("echo"));
        assert_eq!(
            session.modalities,
            Some(vec!["text".to_string(), "audio".to_string()])
        );
        assert_eq!(session.temperature, Some(0.8));
    }

    #[test]
    fn test_unknown_voice_falls_back() {
        let config = RealtimeConfig {
            voice: "baritone".to_string(),
            ..test_config()
        };
        let realtime = OpenAIRealtime::new(config).unwrap();
        assert_eq!(realtime.voice(), OpenAIRealtimeVoice::Echo);
    }

    #[tokio::test]
    async fn test_connect_requires_telephony_leg() {
        let realtime = OpenAIRealtime::new(test_config()).unwrap();
        let session: Session<(), RealtimeSocket> = Session::new("call-1");

        let result = realtime.connect(&session).await;
        assert!(matches!(result, Err(RealtimeError::TelephonyNotReady)));
        assert!(!session.has_ai());
    }

    #[tokio::test]
    async fn test_connect_dial_failure() {
        let config = RealtimeConfig {
            url: "ws://127.0.0.1:1/v1/realtime".to_string(),
            ..test_config()
        };
        let realtime = OpenAIRealtime::new(config).unwrap();
        let session: Session<(), RealtimeSocket> = Session::new("call-1");
        session.mark_telephony_ready(());

        let result = realtime.connect(&session).await;
        assert!(matches!(result, Err(RealtimeError::ConnectionFailed(_))));
        assert!(!session.has_ai());
    }
}
