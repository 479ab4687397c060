//! Inbound request decoding.
//!
//! # Responsibilities
//! - Decode request bodies by content type (form, JSON, raw text)
//! - Parse POST bodies permissively so validation, not parsing, rejects them
//! - Extract query parameters
//!
//! # Design Decisions
//! - Decoding never fails: malformed JSON becomes an empty object and
//!   unknown content types fall back to raw text
//! - Empty query values count as absent

use axum::http::{header, HeaderMap, Uri};
use serde_json::{json, Map, Value};
use url::form_urlencoded;

/// A request body, tagged by how it was decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundBody {
    /// `application/json`; malformed input decodes to `{}`.
    Json(Value),
    /// `application/x-www-form-urlencoded`; repeated keys keep the last value.
    Form(Map<String, Value>),
    /// Anything else, kept as (lossy UTF-8) text.
    Raw(String),
}

impl InboundBody {
    /// Decode `bytes` according to `content_type`.
    pub fn decode(content_type: Option<&str>, bytes: &[u8]) -> Self {
        let content_type = content_type.unwrap_or_default();
        if content_type.contains("application/x-www-form-urlencoded") {
            let fields = form_urlencoded::parse(bytes)
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect();
            InboundBody::Form(fields)
        } else if content_type.contains("application/json") {
            InboundBody::Json(json_or_empty(bytes))
        } else {
            InboundBody::Raw(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    /// The echoed webhook payload for this body.
    pub fn into_payload(self) -> Value {
        match self {
            InboundBody::Json(value) => value,
            InboundBody::Form(fields) => Value::Object(fields),
            InboundBody::Raw(text) => json!({ "raw": text }),
        }
    }
}

/// Parse `bytes` as JSON, yielding `{}` when they are not valid JSON.
pub fn json_or_empty(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// The request's `Content-Type`, if present and readable.
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

/// First non-empty value of query parameter `name`.
pub fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
