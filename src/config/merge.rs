//! Merge environment values with YAML overrides and apply defaults.

use std::path::PathBuf;

use super::env::EnvConfig;
use super::yaml::YamlConfig;
use super::{ServerConfig, TlsConfig};
use crate::core::realtime::{
    DEFAULT_INSTRUCTIONS, DEFAULT_REALTIME_MODEL, DEFAULT_TEMPERATURE, OPENAI_REALTIME_URL,
    OpenAIRealtimeVoice,
};
use crate::core::telephony::twilio::TWILIO_API_URL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Build a [`ServerConfig`]: YAML > environment > defaults.
///
/// Required values that are absent everywhere are left empty here and
/// reported by validation.
pub fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let env = EnvConfig::load()?;
    let yaml = yaml.unwrap_or_default();

    let server = yaml.server.unwrap_or_default();
    let tls_yaml = server.tls.unwrap_or_default();
    let call = yaml.call.unwrap_or_default();
    let twilio = yaml.twilio.unwrap_or_default();
    let realtime = yaml.realtime.unwrap_or_default();

    let tls_enabled = tls_yaml.enabled.or(env.tls_enabled).unwrap_or(false);
    let tls = if tls_enabled {
        let cert_path = tls_yaml.cert_path.or(env.tls_cert_path).ok_or(
            "TLS is enabled but no certificate path is set (TLS_CERT_PATH or server.tls.cert_path)",
        )?;
        let key_path = tls_yaml.key_path.or(env.tls_key_path).ok_or(
            "TLS is enabled but no private key path is set (TLS_KEY_PATH or server.tls.key_path)",
        )?;
        Some(TlsConfig {
            cert_path: PathBuf::from(cert_path),
            key_path: PathBuf::from(key_path),
        })
    } else {
        None
    };

    Ok(ServerConfig {
        host: server
            .host
            .or(env.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: server.port.or(env.port).unwrap_or(DEFAULT_PORT),
        tls,

        phone_number_to: call.to.or(env.phone_number_to).unwrap_or_default(),
        phone_number_from: call.from.or(env.phone_number_from).unwrap_or_default(),
        domain: call.domain.or(env.domain).unwrap_or_default(),

        twilio_account_sid: twilio
            .account_sid
            .or(env.twilio_account_sid)
            .unwrap_or_default(),
        twilio_auth_token: twilio
            .auth_token
            .or(env.twilio_auth_token)
            .unwrap_or_default(),
        twilio_api_url: twilio
            .api_url
            .or(env.twilio_api_url)
            .unwrap_or_else(|| TWILIO_API_URL.to_string()),

        openai_api_key: realtime.api_key.or(env.openai_api_key).unwrap_or_default(),
        realtime_url: realtime
            .url
            .or(env.realtime_url)
            .unwrap_or_else(|| OPENAI_REALTIME_URL.to_string()),
        realtime_model: realtime
            .model
            .or(env.realtime_model)
            .unwrap_or_else(|| DEFAULT_REALTIME_MODEL.to_string()),
        realtime_voice: realtime
            .voice
            .or(env.realtime_voice)
            .unwrap_or_else(|| OpenAIRealtimeVoice::default().as_str().to_string()),
        realtime_instructions: realtime
            .instructions
            .or(env.realtime_instructions)
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
        realtime_temperature: realtime
            .temperature
            .or(env.realtime_temperature)
            .unwrap_or(DEFAULT_TEMPERATURE),
    })
}
