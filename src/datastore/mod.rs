//! Data store adapter.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (auth headers, URL under /rest/v1)
//!     → data store REST API
//!     → StoreResponse (JSON or text) | GatewayError::DataStore
//! ```

pub mod client;
pub mod types;

pub use client::DataStoreClient;
pub use types::{RequestInit, StoreResponse};
