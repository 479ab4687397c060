//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use secrecy::SecretString;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a TOML file, apply environment overrides, and validate.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus environment overrides only.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay deployment environment variables onto `config`.
///
/// `lookup` returns the value of a variable; empty values are ignored so an
/// exported-but-blank variable never clears a file setting.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get("GATEWAY_BIND") {
        config.listener.bind_address = v;
    }

    if let Some(v) = get("SUPABASE_URL") {
        config.datastore.url = Some(v.trim_end_matches('/').to_string());
    }
    if let Some(v) = get("SUPABASE_KEY") {
        config.datastore.key = Some(SecretString::new(v));
    }

    let messaging = &mut config.messaging;
    if let Some(v) = get("TWILIO_ACCOUNT_SID") {
        messaging.account_sid = Some(v);
    }
    if let Some(v) = get("TWILIO_AUTH_TOKEN") {
        messaging.auth_token = Some(SecretString::new(v));
    }
    if let Some(v) = get("TWILIO_API_KEY") {
        messaging.api_key = Some(v);
    }
    if let Some(v) = get("TWILIO_API_SECRET") {
        messaging.api_secret = Some(SecretString::new(v));
    }
    if let Some(v) = get("TWILIO_WHATSAPP_FROM") {
        messaging.whatsapp_from = Some(v);
    }
    if let Some(v) = get("TWILIO_API_BASE") {
        messaging.api_base = v;
    }
}
