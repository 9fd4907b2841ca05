//! Configuration module for the realtime caller
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use realtime_caller::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod env;
mod merge;
mod validation;
mod yaml;

pub use merge::{DEFAULT_HOST, DEFAULT_PORT};
pub use validation::TEMPERATURE_RANGE;

use crate::core::realtime::RealtimeConfig;
use crate::core::telephony::TwilioConfig;

/// TLS configuration for HTTPS and WSS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Contains everything needed to place one call and bridge it:
/// - Server settings (host, port, TLS)
/// - Call parameters (destination, caller id, public domain)
/// - Twilio credentials
/// - OpenAI Realtime credentials and session profile
#[derive(Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Call parameters
    pub phone_number_to: String,
    pub phone_number_from: String,
    /// Public domain (no scheme) that Twilio opens the media stream to
    pub domain: String,

    // Twilio
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_api_url: String,

    // OpenAI Realtime
    pub openai_api_key: String,
    pub realtime_url: String,
    pub realtime_model: String,
    pub realtime_voice: String,
    pub realtime_instructions: String,
    pub realtime_temperature: f32,
}

/// Zeroize secrets when the configuration is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        self.twilio_auth_token.zeroize();
        self.openai_api_key.zeroize();
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("phone_number_to", &self.phone_number_to)
            .field("phone_number_from", &self.phone_number_from)
            .field("domain", &self.domain)
            .field("twilio_account_sid", &self.twilio_account_sid)
            .field("twilio_auth_token", &"<redacted>")
            .field("twilio_api_url", &self.twilio_api_url)
            .field("openai_api_key", &"<redacted>")
            .field("realtime_url", &self.realtime_url)
            .field("realtime_model", &self.realtime_model)
            .field("realtime_voice", &self.realtime_voice)
            .field("realtime_temperature", &self.realtime_temperature)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and defaults
    ///
    /// The .env file is loaded in main.rs before this is called, so its
    /// values are already visible as environment variables.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_required(self)?;
        validation::validate_urls(self)?;
        validation::validate_temperature(self.realtime_temperature)?;
        validation::validate_tls(&self.tls)?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Settings for the realtime leg of every call.
    pub fn realtime_config(&self) -> RealtimeConfig {
        RealtimeConfig {
            api_key: self.openai_api_key.clone(),
            url: self.realtime_url.clone(),
            model: self.realtime_model.clone(),
            voice: self.realtime_voice.clone(),
            instructions: self.realtime_instructions.clone(),
            temperature: self.realtime_temperature,
        }
    }

    /// Settings for placing the outbound call.
    pub fn twilio_config(&self) -> TwilioConfig {
        TwilioConfig {
            account_sid: self.twilio_account_sid.clone(),
            auth_token: self.twilio_auth_token.clone(),
            api_url: self.twilio_api_url.clone(),
            from_number: self.phone_number_from.clone(),
            public_domain: self.domain.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    const ALL_VARS: &[&str] = &[
        "HOST",
        "PORT",
        "TLS_ENABLED",
        "TLS_CERT_PATH",
        "TLS_KEY_PATH",
        "PHONE_NUMBER_TO",
        "PHONE_NUMBER_FROM",
        "DOMAIN",
        "TWILIO_ACCOUNT_SID",
        "TWILIO_AUTH_TOKEN",
        "TWILIO_API_URL",
        "OPENAI_API_KEY",
        "OPENAI_REALTIME_URL",
        "REALTIME_MODEL",
        "REALTIME_VOICE",
        "REALTIME_INSTRUCTIONS",
        "REALTIME_TEMPERATURE",
    ];

    // Helper to clean up environment variables
    fn cleanup_env_vars() {
        unsafe {
            for name in ALL_VARS {
                env::remove_var(name);
            }
        }
    }

    fn set_required_env() {
        unsafe {
            env::set_var("PHONE_NUMBER_TO", "+15551110000");
            env::set_var("PHONE_NUMBER_FROM", "+15550000000");
            env::set_var("DOMAIN", "relay.example.com");
            env::set_var("TWILIO_ACCOUNT_SID", "AC123");
            env::set_var("TWILIO_AUTH_TOKEN", "env-token");
            env::set_var("OPENAI_API_KEY", "sk-env");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();
        set_required_env();

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(!config.is_tls_enabled());
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.phone_number_to, "+15551110000");
        assert_eq!(config.twilio_api_url, "https://api.twilio.com");
        assert_eq!(config.realtime_url, "wss://api.openai.com/v1/realtime");
        assert_eq!(config.realtime_model, "gpt-4o-realtime-preview-2024-12-17");
        assert_eq!(config.realtime_voice, "echo");
        assert_eq!(config.realtime_temperature, 0.8);
        assert!(config.realtime_instructions.contains("pizza"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_reports_all_missing_values() {
        cleanup_env_vars();
        unsafe {
            env::set_var("PHONE_NUMBER_TO", "+15551110000");
        }

        let err = ServerConfig::from_env().unwrap_err().to_string();
        assert!(err.contains("Missing required configuration"));
        assert!(err.contains("PHONE_NUMBER_FROM"));
        assert!(err.contains("DOMAIN"));
        assert!(err.contains("TWILIO_ACCOUNT_SID"));
        assert!(err.contains("TWILIO_AUTH_TOKEN"));
        assert!(err.contains("OPENAI_API_KEY"));
        assert!(!err.contains("PHONE_NUMBER_TO"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_out_of_range_temperature() {
        cleanup_env_vars();
        set_required_env();
        unsafe {
            env::set_var("REALTIME_TEMPERATURE", "2.0");
        }

        let err = ServerConfig::from_env().unwrap_err().to_string();
        assert!(err.contains("REALTIME_TEMPERATURE"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_websocket_realtime_url() {
        cleanup_env_vars();
        set_required_env();
        unsafe {
            env::set_var("OPENAI_REALTIME_URL", "https://api.openai.com/v1/realtime");
        }

        let err = ServerConfig::from_env().unwrap_err().to_string();
        assert!(err.contains("ws:// or wss://"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_tls_enabled_without_paths() {
        cleanup_env_vars();
        set_required_env();
        unsafe {
            env::set_var("TLS_ENABLED", "true");
        }

        let err = ServerConfig::from_env().unwrap_err().to_string();
        assert!(err.contains("certificate path"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_overrides_env() {
        cleanup_env_vars();
        set_required_env();
        unsafe {
            env::set_var("HOST", "0.0.0.0");
            env::set_var("REALTIME_VOICE", "shimmer");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let yaml_content = r#"
server:
  host: "127.0.0.1"
  port: 9000

call:
  to: "+15552220000"

realtime:
  api_key: "sk-yaml"
  voice: "alloy"
  temperature: 1.0
"#;
        fs::write(&config_path, yaml_content).unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();

        // YAML overrides ENV
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.phone_number_to, "+15552220000");
        assert_eq!(config.openai_api_key, "sk-yaml");
        assert_eq!(config.realtime_voice, "alloy");
        assert_eq!(config.realtime_temperature, 1.0);
        // ENV values remain where YAML is silent
        assert_eq!(config.phone_number_from, "+15550000000");
        assert_eq!(config.twilio_auth_token, "env-token");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_only() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let yaml_content = r#"
call:
  to: "+15551110000"
  from: "+15550000000"
  domain: "relay.example.com"
twilio:
  account_sid: "AC999"
  auth_token: "yaml-token"
  api_url: "http://localhost:4010"
realtime:
  api_key: "sk-yaml"
  url: "ws://localhost:4020/v1/realtime"
"#;
        fs::write(&config_path, yaml_content).unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();
        assert_eq!(config.twilio_account_sid, "AC999");
        assert_eq!(config.twilio_api_url, "http://localhost:4010");
        assert_eq!(config.realtime_url, "ws://localhost:4020/v1/realtime");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_missing_file() {
        cleanup_env_vars();

        let result = ServerConfig::from_file(&PathBuf::from("/nonexistent/config.yaml"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_with_tls() {
        cleanup_env_vars();
        set_required_env();

        let temp_dir = TempDir::new().unwrap();
        let cert_path = temp_dir.path().join("cert.pem");
        let key_path = temp_dir.path().join("key.pem");
        fs::write(&cert_path, "cert").unwrap();
        fs::write(&key_path, "key").unwrap();

        let config_path = temp_dir.path().join("config.yaml");
        let yaml_content = format!(
            r#"
server:
  tls:
    enabled: true
    cert_path: "{}"
    key_path: "{}"
"#,
            cert_path.display(),
            key_path.display()
        );
        fs::write(&config_path, yaml_content).unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();
        assert!(config.is_tls_enabled());
        assert_eq!(config.tls.as_ref().unwrap().cert_path, cert_path);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_derived_provider_configs() {
        cleanup_env_vars();
        set_required_env();
        unsafe {
            env::set_var("REALTIME_MODEL", "gpt-4o-mini-realtime-preview");
        }

        let config = ServerConfig::from_env().unwrap();

        let realtime = config.realtime_config();
        assert_eq!(realtime.api_key, "sk-env");
        assert_eq!(realtime.model, "gpt-4o-mini-realtime-preview");
        assert_eq!(realtime.voice, "echo");

        let twilio = config.twilio_config();
        assert_eq!(twilio.account_sid, "AC123");
        assert_eq!(twilio.from_number, "+15550000000");
        assert_eq!(twilio.stream_url(), "wss://relay.example.com/ws");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_debug_redacts_secrets() {
        cleanup_env_vars();
        set_required_env();

        let config = ServerConfig::from_env().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("env-token"));
        assert!(!debug.contains("sk-env"));
        assert!(debug.contains("<redacted>"));

        cleanup_env_vars();
    }
}
