//! Delivery routes: creation and driver acceptance.

use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;
use serde_json::json;

use crate::deliveries::{
    AcceptancePatch, DeliveryRequest, DriverAcceptance, NewDeliveryRow, Rejection, COLLECTION,
};
use crate::error::GatewayResult;
use crate::http::request::json_or_empty;
use crate::http::response::{error_json, json_ok};
use crate::http::server::AppState;

/// `POST /criar-entrega`
pub async fn create(state: &AppState, body: &[u8]) -> GatewayResult<Response> {
    let request = match DeliveryRequest::from_body(json_or_empty(body)) {
        Ok(request) => request,
        Err(rejection) => return Ok(reject(rejection)),
    };

    let row = NewDeliveryRow::new(request, Utc::now());
    let stored = state
        .datastore
        .insert(COLLECTION, serde_json::to_value(&row)?)
        .await?;
    let entrega = stored.first_row();

    tracing::info!(id = ?entrega.get("id"), "Delivery created");
    Ok(json_ok(json!({ "ok": true, "entrega": entrega })))
}

/// `POST /aceitar-motorista`
pub async fn accept_driver(state: &AppState, body: &[u8]) -> GatewayResult<Response> {
    let acceptance = match DriverAcceptance::from_body(json_or_empty(body)) {
        Ok(acceptance) => acceptance,
        Err(rejection) => return Ok(reject(rejection)),
    };

    let id = acceptance.entrega_id.to_string();
    let patch = AcceptancePatch::new(&acceptance.driver, Utc::now());
    state
        .datastore
        .update(COLLECTION, "id", &id, serde_json::to_value(&patch)?)
        .await?;

    tracing::info!(id = %id, "Driver accepted delivery");
    Ok(json_ok(json!({ "ok": true })))
}

fn reject(rejection: Rejection) -> Response {
    tracing::debug!(reason = %rejection, "Rejected delivery request");
    error_json(rejection.to_string(), StatusCode::BAD_REQUEST)
}
