//! Request and response shapes for the data store adapter.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;

/// Header asking the store to echo the written rows.
pub const PREFER: HeaderName = HeaderName::from_static("prefer");

/// Method, body and extra headers of one data store call.
#[derive(Debug, Clone)]
pub struct RequestInit {
    pub method: Method,
    pub body: Option<Value>,
    /// Merged over the adapter's defaults; these win on conflict.
    pub headers: HeaderMap,
}

impl RequestInit {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post(body: Value) -> Self {
        Self::new(Method::POST).with_body(body)
    }

    pub fn patch(body: Value) -> Self {
        Self::new(Method::PATCH).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds `Prefer: return=representation`.
    pub fn return_representation(self) -> Self {
        self.with_header(PREFER, HeaderValue::from_static("return=representation"))
    }
}

/// A successful data store answer.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreResponse {
    /// Body served as `application/json`.
    Json(Value),
    /// Any other body, as text.
    Text(String),
}

impl StoreResponse {
    /// The single record of a write that echoed its rows.
    ///
    /// The store answers writes with an array of rows; the first one is the
    /// record. Non-array bodies are returned as they are.
    pub fn first_row(self) -> Value {
        match self {
            StoreResponse::Json(Value::Array(rows)) => {
                rows.into_iter().next().unwrap_or(Value::Null)
            }
            StoreResponse::Json(value) => value,
            StoreResponse::Text(text) => Value::String(text),
        }
    }
}
