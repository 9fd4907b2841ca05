//! Twilio configuration.

use zeroize::Zeroize;

/// Twilio REST API base URL.
pub const TWILIO_API_URL: &str = "https://api.twilio.com";

/// Path of the media-stream WebSocket endpoint served by this process.
pub const MEDIA_STREAM_PATH: &str = "/ws";

/// Settings for placing calls through Twilio.
#[derive(Clone)]
pub struct TwilioConfig {
    /// Account SID (also the basic-auth username)
    pub account_sid: String,
    /// Auth token (basic-auth password)
    pub auth_token: String,
    /// REST API base URL
    pub api_url: String,
    /// Caller id for outbound calls
    pub from_number: String,
    /// Public domain Twilio connects the media stream back to
    pub public_domain: String,
}

impl TwilioConfig {
    /// `wss://` URL of the media-stream endpoint as seen from Twilio.
    pub fn stream_url(&self) -> String {
        let domain = self
            .public_domain
            .trim_start_matches("https://")
            .trim_start_matches("wss://")
            .trim_end_matches('/');
        format!("wss://{domain}{MEDIA_STREAM_PATH}")
    }

    /// Calls resource for this account.
    pub fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("from_number", &self.from_number)
            .field("public_domain", &self.public_domain)
            .finish()
    }
}

impl Drop for TwilioConfig {
    fn drop(&mut self) {
        self.auth_token.zeroize();
    }
}
