//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.
//! Credentials are optional here: a missing credential only fails the
//! request that needs it.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Data store connection settings.
    pub datastore: DataStoreConfig,

    /// Messaging gateway settings.
    pub messaging: MessagingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,

    /// Outbound HTTP client timeout in seconds (data store and messaging).
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 15,
        }
    }
}

/// Data store (REST persistence backend) settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DataStoreConfig {
    /// Base URL, without the `/rest/v1` suffix.
    pub url: Option<String>,

    /// API key, sent both as `apikey` and as a bearer token.
    pub key: Option<SecretString>,
}

impl DataStoreConfig {
    /// Configured base URL, treating an empty value as absent.
    pub fn url(&self) -> Option<&str> {
        present(self.url.as_deref())
    }

    /// Configured API key, treating an empty value as absent.
    pub fn key(&self) -> Option<&str> {
        present_secret(self.key.as_ref())
    }
}

/// Messaging gateway settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Account identifier; part of the send endpoint path.
    pub account_sid: Option<String>,

    /// Auth token paired with the account SID.
    pub auth_token: Option<SecretString>,

    /// API key SID (preferred credential).
    pub api_key: Option<String>,

    /// Secret paired with the API key.
    pub api_secret: Option<SecretString>,

    /// Sender address, e.g. `whatsapp:+14155238886`.
    pub whatsapp_from: Option<String>,

    /// Provider API base URL.
    pub api_base: String,

    /// Body used by `/whatsapp/test` when no `msg` is given.
    pub test_message: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            api_key: None,
            api_secret: None,
            whatsapp_from: None,
            api_base: "https://api.twilio.com".to_string(),
            test_message: "VAIJÁ: teste via Twilio Sandbox ✅".to_string(),
        }
    }
}

impl MessagingConfig {
    pub fn account_sid(&self) -> Option<&str> {
        present(self.account_sid.as_deref())
    }

    pub fn auth_token(&self) -> Option<&str> {
        present_secret(self.auth_token.as_ref())
    }

    pub fn api_key(&self) -> Option<&str> {
        present(self.api_key.as_deref())
    }

    pub fn api_secret(&self) -> Option<&str> {
        present_secret(self.api_secret.as_ref())
    }

    pub fn whatsapp_from(&self) -> Option<&str> {
        present(self.whatsapp_from.as_deref())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn present_secret(value: Option<&SecretString>) -> Option<&str> {
    present(value.map(|s| s.expose_secret().as_str()))
}
