//! Gateway error type.
//!
//! Validation failures never become a `GatewayError`: handlers answer them
//! with a 400 directly. Everything here ends up at the dispatch boundary in
//! `http::server`, which renders it as `{ "error": <Display> }` with status 500.

use thiserror::Error;

/// Errors raised while serving a request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A setting needed by this request is not configured.
    #[error("{0} missing")]
    MissingConfig(&'static str),

    /// Neither messaging credential pair is complete.
    #[error("missing messaging credentials")]
    MissingCredentials,

    /// The data store answered with a non-success status.
    #[error("data store {status}: {body}")]
    DataStore { status: u16, body: String },

    /// The messaging gateway answered with a non-success status.
    #[error("messaging gateway {status} → {body}")]
    Messaging { status: u16, body: String },

    /// Outbound request could not be completed.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A configured value cannot be used as an HTTP header.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// The request did not finish within the inbound timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Inbound body could not be read.
    #[error("failed to read request body: {0}")]
    Body(String),

    /// A value could not be serialized to JSON.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::MissingConfig("messaging account sid");
        assert_eq!(err.to_string(), "messaging account sid missing");

        let err = GatewayError::DataStore {
            status: 409,
            body: "duplicate key".into(),
        };
        assert_eq!(err.to_string(), "data store 409: duplicate key");

        let err = GatewayError::Messaging {
            status: 401,
            body: "{\"code\":20003}".into(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("20003"));
    }

    #[test]
    fn test_missing_credentials_message() {
        assert_eq!(
            GatewayError::MissingCredentials.to_string(),
            "missing messaging credentials"
        );
    }
}
