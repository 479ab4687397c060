//! Data store REST client.
//!
//! # Responsibilities
//! - Address `<base>/rest/v1<path>` with the configured key
//! - Merge caller headers over the authentication defaults
//! - Decode JSON bodies, fall back to text for anything else
//! - Turn every non-success status into `GatewayError::DataStore`

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::form_urlencoded;

use crate::config::DataStoreConfig;
use crate::datastore::types::{RequestInit, StoreResponse};
use crate::error::{GatewayError, GatewayResult};
use crate::observability::metrics;

const APIKEY: HeaderName = HeaderName::from_static("apikey");

/// Client for the data store's REST interface.
#[derive(Clone)]
pub struct DataStoreClient {
    http: reqwest::Client,
    config: DataStoreConfig,
}

impl DataStoreClient {
    pub fn new(http: reqwest::Client, config: DataStoreConfig) -> Self {
        Self { http, config }
    }

    /// Issue one call to `path` (relative to `/rest/v1`).
    ///
    /// Missing URL or key fails here, not at startup. There are no retries.
    pub async fn call(&self, path: &str, init: RequestInit) -> GatewayResult<StoreResponse> {
        let base = self
            .config
            .url()
            .ok_or(GatewayError::MissingConfig("data store url"))?;
        let key = self
            .config
            .key()
            .ok_or(GatewayError::MissingConfig("data store key"))?;

        let url = format!("{}/rest/v1{}", base.trim_end_matches('/'), path);
        let headers = merged_headers(key, &init.headers)?;

        tracing::debug!(method = %init.method, url = %url, "Data store request");

        let mut request = self.http.request(init.method, &url).headers(headers);
        if let Some(body) = init.body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        metrics::record_upstream("datastore", status.as_u16());

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            tracing::warn!(status = status.as_u16(), url = %url, "Data store rejected request");
            return Err(GatewayError::DataStore {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            Ok(StoreResponse::Json(response.json().await?))
        } else {
            Ok(StoreResponse::Text(response.text().await?))
        }
    }

    /// Create a row in `collection`, echoing the stored representation.
    pub async fn insert(&self, collection: &str, row: Value) -> GatewayResult<StoreResponse> {
        let init = RequestInit::post(row).return_representation();
        self.call(&format!("/{}", collection), init).await
    }

    /// Patch the rows of `collection` whose `column` equals `value`.
    pub async fn update(
        &self,
        collection: &str,
        column: &str,
        value: &str,
        patch: Value,
    ) -> GatewayResult<StoreResponse> {
        let path = format!("/{}?{}", collection, eq_filter(column, value));
        let init = RequestInit::patch(patch).return_representation();
        self.call(&path, init).await
    }
}

impl std::fmt::Debug for DataStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStoreClient")
            .field("url", &self.config.url())
            .field("has_key", &self.config.key().is_some())
            .finish()
    }
}

/// Authentication defaults with the caller's headers layered on top.
fn merged_headers(key: &str, caller: &HeaderMap) -> GatewayResult<HeaderMap> {
    let key_value =
        HeaderValue::from_str(key).map_err(|_| GatewayError::InvalidHeader("data store key"))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
        .map_err(|_| GatewayError::InvalidHeader("data store key"))?;

    let mut headers = HeaderMap::new();
    headers.insert(APIKEY, key_value);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for name in caller.keys() {
        headers.remove(name);
        for value in caller.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    Ok(headers)
}

/// `column=eq.<value>` with the value query-encoded.
fn eq_filter(column: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(column, &format!("eq.{}", value))
        .finish()
}
