//! Messaging gateway client.
//!
//! # Responsibilities
//! - Check account SID and sender before anything leaves the process
//! - Resolve Basic credentials (see `credentials.rs`)
//! - POST form-encoded `From`/`To`/`Body` to the per-account endpoint
//! - Accept non-JSON success bodies as `{ ok: true, raw }`

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

use crate::config::MessagingConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::messaging::credentials;
use crate::observability::metrics;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Client for the messaging provider's REST API.
#[derive(Clone)]
pub struct MessagingClient {
    http: reqwest::Client,
    config: MessagingConfig,
}

impl MessagingClient {
    pub fn new(http: reqwest::Client, config: MessagingConfig) -> Self {
        Self { http, config }
    }

    /// Send `body` to `to` from the configured sender address.
    pub async fn send(&self, to: &str, body: &str) -> GatewayResult<Value> {
        let account_sid = self
            .config
            .account_sid()
            .ok_or(GatewayError::MissingConfig("messaging account sid"))?;
        let from = self
            .config
            .whatsapp_from()
            .ok_or(GatewayError::MissingConfig("messaging sender address"))?;
        let auth = credentials::resolve(&self.config)?;

        let url = self.messages_url(account_sid);
        tracing::debug!(
            url = %url,
            strategy = auth.strategy.name(),
            to = %to,
            "Sending message"
        );

        let form = send_form(from, to, body);
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth.header_value())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form)
            .send()
            .await?;

        let status = response.status();
        metrics::record_upstream("messaging", status.as_u16());
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Messaging gateway rejected send");
            return Err(GatewayError::Messaging {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(parse_send_result(text))
    }

    /// `<api base>/2010-04-01/Accounts/<sid>/Messages.json`
    pub fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            account_sid
        )
    }
}

impl std::fmt::Debug for MessagingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingClient")
            .field("api_base", &self.config.api_base)
            .field("account_sid", &self.config.account_sid())
            .finish()
    }
}

fn send_form(from: &str, to: &str, body: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("From", from)
        .append_pair("To", to)
        .append_pair("Body", body)
        .finish()
}

fn parse_send_result(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => json!({ "ok": true, "raw": text }),
    }
}
