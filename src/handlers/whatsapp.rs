//! Messaging routes: test send and provider webhook.

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::GatewayResult;
use crate::http::request::{query_param, InboundBody};
use crate::http::response::{error_json, json_ok};
use crate::http::server::AppState;

/// `GET /whatsapp/test?to=<addr>[&msg=<text>]`
pub async fn send_test(state: &AppState, uri: &Uri) -> GatewayResult<Response> {
    let Some(to) = query_param(uri, "to") else {
        return Ok(error_json(
            "to required: whatsapp:+55YOURNUMBER",
            StatusCode::BAD_REQUEST,
        ));
    };
    let msg = query_param(uri, "msg")
        .unwrap_or_else(|| state.config.messaging.test_message.clone());

    let result = state.messaging.send(&to, &msg).await?;
    tracing::info!(to = %to, "Test message sent");
    Ok(json_ok(json!({ "sent": true, "result": result })))
}

/// `GET /whatsapp/webhook`: plain `ok` for the provider's verification step.
pub fn webhook_verify() -> Response {
    "ok".into_response()
}

/// `POST /whatsapp/webhook`: decode and echo the callback.
pub fn webhook_receive(content_type: Option<&str>, body: &[u8]) -> Response {
    let payload = InboundBody::decode(content_type, body).into_payload();
    tracing::info!(bytes = body.len(), "Webhook received");
    json_ok(json!({ "received": true, "payload": payload }))
}
