//! Messaging credential resolution.
//!
//! Strategies are tried in order and the first one whose fields are all
//! configured wins. Each one yields an HTTP Basic `Authorization` value.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::MessagingConfig;
use crate::error::{GatewayError, GatewayResult};

/// A way of authenticating against the messaging gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStrategy {
    /// API key SID + API key secret.
    ApiKey,
    /// Account SID + account auth token.
    AuthToken,
}

/// Resolution order.
pub const STRATEGIES: [CredentialStrategy; 2] =
    [CredentialStrategy::ApiKey, CredentialStrategy::AuthToken];

impl CredentialStrategy {
    pub fn name(self) -> &'static str {
        match self {
            CredentialStrategy::ApiKey => "api_key",
            CredentialStrategy::AuthToken => "auth_token",
        }
    }

    /// `(username, password)` when both halves are configured.
    pub fn pair(self, config: &MessagingConfig) -> Option<(&str, &str)> {
        match self {
            CredentialStrategy::ApiKey => config.api_key().zip(config.api_secret()),
            CredentialStrategy::AuthToken => config.account_sid().zip(config.auth_token()),
        }
    }

    /// Whether this strategy is fully configured.
    pub fn is_complete(self, config: &MessagingConfig) -> bool {
        self.pair(config).is_some()
    }
}

/// Resolved `Authorization` header value.
#[derive(Clone)]
pub struct BasicAuth {
    pub strategy: CredentialStrategy,
    header: String,
}

impl BasicAuth {
    pub fn header_value(&self) -> &str {
        &self.header
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("strategy", &self.strategy)
            .field("header", &"[REDACTED]")
            .finish()
    }
}

/// Pick the first complete strategy.
pub fn resolve(config: &MessagingConfig) -> GatewayResult<BasicAuth> {
    STRATEGIES
        .iter()
        .find_map(|strategy| {
            strategy.pair(config).map(|(user, pass)| BasicAuth {
                strategy: *strategy,
                header: basic_auth_header(user, pass),
            })
        })
        .ok_or(GatewayError::MissingCredentials)
}

/// `Basic base64(user:pass)`.
pub fn basic_auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass)))
}
