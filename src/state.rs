//! Shared application state.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::realtime::{OpenAIRealtime, RealtimeResult};
use crate::core::relay::SessionRegistry;

/// State shared by every request handler.
pub struct AppState {
    pub config: ServerConfig,
    /// Connector for the realtime leg of each call
    pub realtime: OpenAIRealtime,
    /// Admission control for bridged calls
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(config: ServerConfig) -> RealtimeResult<Arc<Self>> {
        let realtime = OpenAIRealtime::new(config.realtime_config())?;
        Ok(Arc::new(Self {
            config,
            realtime,
            sessions: SessionRegistry::new(),
        }))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::test_config;
    use super::*;
    use crate::core::realtime::RealtimeError;

    #[test]
    fn test_new_builds_connector() {
        let state = AppState::new(test_config("ws://127.0.0.1:1/v1/realtime")).unwrap();
        assert_eq!(state.realtime.model(), "gpt-4o-realtime-preview-2024-12-17");
        assert_eq!(state.sessions.active_count(), 0);
    }

    #[test]
    fn test_new_requires_api_key() {
        let mut config = test_config("ws://127.0.0.1:1/v1/realtime");
        config.openai_api_key = String::new();
        assert!(matches!(
            AppState::new(config),
            Err(RealtimeError::AuthenticationFailed(_))
        ));
    }
}
