//! Configuration validation.

use super::{ServerConfig, TlsConfig};

/// Temperature range accepted by the Realtime API.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.6..=1.2;

/// Every required value, named by its environment variable.
///
/// All missing values are reported in a single error.
pub fn validate_required(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let required = [
        ("PHONE_NUMBER_TO", &config.phone_number_to),
        ("PHONE_NUMBER_FROM", &config.phone_number_from),
        ("DOMAIN", &config.domain),
        ("TWILIO_ACCOUNT_SID", &config.twilio_account_sid),
        ("TWILIO_AUTH_TOKEN", &config.twilio_auth_token),
        ("OPENAI_API_KEY", &config.openai_api_key),
    ];

    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required configuration: {}", missing.join(", ")).into())
    }
}

pub fn validate_tls(tls: &Option<TlsConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(tls) = tls else {
        return Ok(());
    };
    if !tls.cert_path.exists() {
        return Err(format!(
            "TLS certificate file not found: {}",
            tls.cert_path.display()
        )
        .into());
    }
    if !tls.key_path.exists() {
        return Err(format!("TLS key file not found: {}", tls.key_path.display()).into());
    }
    Ok(())
}

pub fn validate_urls(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let realtime = url::Url::parse(&config.realtime_url)
        .map_err(|e| format!("Invalid OPENAI_REALTIME_URL '{}': {e}", config.realtime_url))?;
    if !matches!(realtime.scheme(), "ws" | "wss") {
        return Err(format!(
            "OPENAI_REALTIME_URL must use ws:// or wss://, got '{}'",
            config.realtime_url
        )
        .into());
    }

    let twilio = url::Url::parse(&config.twilio_api_url)
        .map_err(|e| format!("Invalid TWILIO_API_URL '{}': {e}", config.twilio_api_url))?;
    if !matches!(twilio.scheme(), "http" | "https") {
        return Err(format!(
            "TWILIO_API_URL must use http:// or https://, got '{}'",
            config.twilio_api_url
        )
        .into());
    }

    Ok(())
}

pub fn validate_temperature(temperature: f32) -> Result<(), Box<dyn std::error::Error>> {
    if TEMPERATURE_RANGE.contains(&temperature) {
        Ok(())
    } else {
        Err(format!(
            "REALTIME_TEMPERATURE must be between {} and {}, got {temperature}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        )
        .into())
    }
}
