//! Delivery request, row and patch shapes.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

/// Collection holding delivery rows.
pub const COLLECTION: &str = "entregas";

/// Lifecycle of a delivery row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Waiting for a driver.
    Buscando,
    /// A driver took the job.
    Aceita,
}

/// Why a request body was refused before any upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Required fields absent.
    Missing(&'static str),
    /// Fields present but of the wrong shape.
    Invalid(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Missing(fields) => write!(f, "{} required", fields),
            Rejection::Invalid(reason) => write!(f, "invalid payload: {}", reason),
        }
    }
}

/// A point on the map. Coordinates keep the number exactly as sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub lat: Number,
    pub lng: Number,
    #[serde(default)]
    pub endereco: Value,
}

/// Body of `POST /criar-entrega`.
///
/// Only the coordinates are typed. `cliente` and `preco` are carried as
/// whatever JSON the client sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeliveryRequest {
    pub origem: Location,
    pub destino: Location,
    #[serde(default)]
    pub cliente: Value,
    #[serde(default)]
    pub preco: Value,
}

impl DeliveryRequest {
    /// Validate a (permissively parsed) body.
    pub fn from_body(body: Value) -> Result<Self, Rejection> {
        if !is_truthy(body.get("origem")) || !is_truthy(body.get("destino")) {
            return Err(Rejection::Missing("origem/destino"));
        }
        serde_json::from_value(body).map_err(|e| Rejection::Invalid(e.to_string()))
    }
}

/// Row inserted for a new delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDeliveryRow {
    pub status: DeliveryStatus,
    pub cliente_nome: Value,
    pub cliente_fone: Value,
    pub origem_lat: Number,
    pub origem_lng: Number,
    pub origem_endereco: Value,
    pub destino_lat: Number,
    pub destino_lng: Number,
    pub destino_endereco: Value,
    pub preco: Value,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl NewDeliveryRow {
    /// A `buscando` row stamped with `now` for both timestamps.
    ///
    /// Falsy customer and address values are stored as `null`; `preco` is
    /// kept unless absent.
    pub fn new(request: DeliveryRequest, now: DateTime<Utc>) -> Self {
        let cliente = &request.cliente;
        Self {
            status: DeliveryStatus::Buscando,
            cliente_nome: field_or_null(cliente, "nome"),
            cliente_fone: field_or_null(cliente, "fone"),
            origem_lat: request.origem.lat,
            origem_lng: request.origem.lng,
            origem_endereco: truthy_or_null(request.origem.endereco),
            destino_lat: request.destino.lat,
            destino_lng: request.destino.lng,
            destino_endereco: truthy_or_null(request.destino.endereco),
            preco: request.preco,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Delivery identifier as clients send it: a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeliveryId {
    Text(String),
    Number(Number),
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryId::Text(s) => f.write_str(s),
            DeliveryId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Body of `POST /aceitar-motorista`.
///
/// `driver` is read loosely: `nome`, `placa`, `veiculo`, `fone` and
/// `avatar` may be of any JSON type, or missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverAcceptance {
    #[serde(rename = "entregaId")]
    pub entrega_id: DeliveryId,
    #[serde(default)]
    pub driver: Value,
}

impl DriverAcceptance {
    pub fn from_body(body: Value) -> Result<Self, Rejection> {
        if !is_truthy(body.get("entregaId")) {
            return Err(Rejection::Missing("entregaId"));
        }
        serde_json::from_value(body).map_err(|e| Rejection::Invalid(e.to_string()))
    }
}

/// Patch applied when a driver accepts a delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptancePatch {
    pub status: DeliveryStatus,
    pub driver_nome: Value,
    pub driver_placa: Value,
    pub driver_veiculo: Value,
    pub driver_fone: Value,
    pub driver_avatar: Value,
    #[serde(serialize_with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl AcceptancePatch {
    pub fn new(driver: &Value, now: DateTime<Utc>) -> Self {
        Self {
            status: DeliveryStatus::Aceita,
            driver_nome: field_or_null(driver, "nome"),
            driver_placa: field_or_null(driver, "placa"),
            driver_veiculo: field_or_null(driver, "veiculo"),
            driver_fone: field_or_null(driver, "fone"),
            driver_avatar: field_or_null(driver, "avatar"),
            updated_at: now,
        }
    }
}

/// `2024-05-01T12:00:00.000Z`
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_timestamp(at))
}

/// `object[key]`, or `null` when missing or falsy. Non-objects have no keys.
fn field_or_null(object: &Value, key: &str) -> Value {
    truthy_or_null(object.get(key).cloned().unwrap_or(Value::Null))
}

fn truthy_or_null(value: Value) -> Value {
    if is_truthy(Some(&value)) {
        value
    } else {
        Value::Null
    }
}

/// Presence in the loose sense clients expect: not null, false, 0 or "".
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
