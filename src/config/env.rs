//! Environment variable loading.
//!
//! Every value is optional at this stage; defaults and required-value checks
//! are applied after the YAML overlay in `merge`.

use std::env;

/// Raw configuration values read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls_enabled: Option<bool>,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,

    pub phone_number_to: Option<String>,
    pub phone_number_from: Option<String>,
    pub domain: Option<String>,

    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_api_url: Option<String>,

    pub openai_api_key: Option<String>,
    pub realtime_url: Option<String>,
    pub realtime_model: Option<String>,
    pub realtime_voice: Option<String>,
    pub realtime_instructions: Option<String>,
    pub realtime_temperature: Option<f32>,
}

/// Read a variable, treating unset and blank the same way.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, Box<dyn std::error::Error>> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("Invalid boolean for {name}: '{value}'").into()),
    }
}

impl EnvConfig {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let port = var("PORT")
            .map(|v| {
                v.parse::<u16>()
                    .map_err(|e| format!("Invalid PORT '{v}': {e}"))
            })
            .transpose()?;

        let tls_enabled = var("TLS_ENABLED")
            .map(|v| parse_bool("TLS_ENABLED", &v))
            .transpose()?;

        let realtime_temperature = var("REALTIME_TEMPERATURE")
            .map(|v| {
                v.parse::<f32>()
                    .map_err(|e| format!("Invalid REALTIME_TEMPERATURE '{v}': {e}"))
            })
            .transpose()?;

        Ok(Self {
            host: var("HOST"),
            port,
            tls_enabled,
            tls_cert_path: var("TLS_CERT_PATH"),
            tls_key_path: var("TLS_KEY_PATH"),
            phone_number_to: var("PHONE_NUMBER_TO"),
            phone_number_from: var("PHONE_NUMBER_FROM"),
            domain: var("DOMAIN"),
            twilio_account_sid: var("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: var("TWILIO_AUTH_TOKEN"),
            twilio_api_url: var("TWILIO_API_URL"),
            openai_api_key: var("OPENAI_API_KEY"),
            realtime_url: var("OPENAI_REALTIME_URL"),
            realtime_model: var("REALTIME_MODEL"),
            realtime_voice: var("REALTIME_VOICE"),
            realtime_instructions: var("REALTIME_INSTRUCTIONS"),
            realtime_temperature,
        })
    }
}
