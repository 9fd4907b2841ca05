//! Twilio Calls API client.
//!
//! Places an outbound call whose inline TwiML connects the answered call to
//! this server's media-stream endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::config::TwilioConfig;
use super::messages::{ApiErrorBody, CallResource, CreateCallParams};
use super::twiml;
use crate::core::telephony::base::{CallPlacer, PlacedCall, TelephonyError, TelephonyResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound call placer backed by the Twilio REST API.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    config: TwilioConfig,
    http_client: reqwest::Client,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig) -> TelephonyResult<Self> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(TelephonyError::InvalidConfiguration(
                "Twilio account SID and auth token are required".to_string(),
            ));
        }
        if config.from_number.is_empty() {
            return Err(TelephonyError::InvalidConfiguration(
                "Caller number is required".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                TelephonyError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }

    /// Inline TwiML attached to every placed call.
    pub fn twiml(&self) -> String {
        twiml::connect_stream(&self.config.stream_url())
    }
}

#[async_trait]
impl CallPlacer for TwilioClient {
    async fn place_call(&self, to: &str) -> TelephonyResult<PlacedCall> {
        if to.is_empty() {
            return Err(TelephonyError::InvalidConfiguration(
                "Destination number is required".to_string(),
            ));
        }

        let twiml = self.twiml();
        let params = CreateCallParams {
            to,
            from: &self.config.from_number,
            twiml: &twiml,
        };
        debug!(to = %to, stream_url = %self.config.stream_url(), "Placing Twilio call");

        let response = self
            .http_client
            .post(self.config.calls_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| TelephonyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelephonyError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|err| match err.code {
                    Some(code) => format!("{} (code {code})", err.message),
                    None => err.message,
                })
                .unwrap_or(body);
            error!(status = status.as_u16(), "Twilio rejected call: {}", message);
            return Err(TelephonyError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        let resource: CallResource = serde_json::from_str(&body)
            .map_err(|e| TelephonyError::InvalidResponse(e.to_string()))?;
        let call_sid = resource
            .sid
            .filter(|sid| !sid.is_empty())
            .ok_or_else(|| TelephonyError::InvalidResponse("missing call sid".to_string()))?;

        info!(call_sid = %call_sid, status = ?resource.status, "Call placed");
        Ok(PlacedCall {
            call_sid,
            status: resource.status,
        })
    }
}
