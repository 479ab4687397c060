//! Liveness and configuration report.

use axum::response::Response;
use chrono::Utc;
use serde_json::json;

use crate::config::GatewayConfig;
use crate::deliveries::types::iso_timestamp;
use crate::http::response::json_ok;
use crate::messaging::CredentialStrategy;

/// `{ ok: true, now }`
pub fn health() -> Response {
    json_ok(json!({ "ok": true, "now": iso_timestamp(&Utc::now()) }))
}

/// Which settings are present. Never includes keys, tokens or secrets.
pub fn env_report(config: &GatewayConfig) -> Response {
    let messaging = &config.messaging;
    json_ok(json!({
        "datastore": {
            "url": config.datastore.url(),
            "hasKey": config.datastore.key().is_some(),
        },
        "messaging": {
            "accountSidSet": messaging.account_sid().is_some(),
            "from": messaging.whatsapp_from(),
            "usingApiKey": CredentialStrategy::ApiKey.is_complete(messaging),
            "usingAuthToken": messaging.auth_token().is_some(),
        },
    }))
}
