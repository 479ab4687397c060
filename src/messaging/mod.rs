//! Messaging adapter (WhatsApp-style send API).
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (account SID, sender, form body)
//!     → credentials.rs (api key pair, else account SID + auth token)
//!     → messaging gateway REST API
//!     → send result JSON | { ok: true, raw } | GatewayError::Messaging
//! ```

pub mod client;
pub mod credentials;

pub use client::MessagingClient;
pub use credentials::{BasicAuth, CredentialStrategy};
