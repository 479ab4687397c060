//! Response construction and the CORS envelope.
//!
//! # Responsibilities
//! - Serialize handler payloads as JSON with a fixed content type
//! - Apply the CORS envelope to every routed response
//! - Build the pre-flight (`OPTIONS`) response
//! - Render the uniform `{ "error": ... }` body
//!
//! # Design Decisions
//! - The CORS wrapper only adds headers that are not already set; body,
//!   status and any existing headers pass through untouched
//! - The dispatcher applies the wrapper exactly once per response

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};

/// Content type of every JSON response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Pre-flight cache lifetime in seconds.
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// Headers applied to every routed response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET,POST,OPTIONS"),
    ("access-control-allow-headers", "content-type,authorization"),
];

/// JSON response with status 200.
pub fn json_ok(value: Value) -> Response {
    json_with(value, StatusCode::OK, HeaderMap::new())
}

/// JSON response with an explicit status.
pub fn json_status(value: Value, status: StatusCode) -> Response {
    json_with(value, status, HeaderMap::new())
}

/// JSON response with an explicit status and extra headers.
///
/// Extra headers override the default content type when they set one.
pub fn json_with(value: Value, status: StatusCode, headers: HeaderMap) -> Response {
    let mut response = Response::new(Body::from(value.to_string()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    for (name, value) in headers.iter() {
        response.headers_mut().insert(name.clone(), value.clone());
    }
    response
}

/// The `{ "error": message }` envelope.
pub fn error_json(message: impl Into<String>, status: StatusCode) -> Response {
    json_status(json!({ "error": message.into() }), status)
}

/// Reissue `response` with the CORS envelope.
pub fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        let name = HeaderName::from_static(name);
        if !headers.contains_key(&name) {
            headers.insert(name, HeaderValue::from_static(value));
        }
    }
    response
}

/// The 204 answer to any `OPTIONS` request.
pub fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(PREFLIGHT_MAX_AGE),
    );
    with_cors(response)
}
