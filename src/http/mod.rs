//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, pre-flight)
//!     → routing (Route lookup)
//!     → request.rs (body decoding, query parameters)
//!     → handlers (validation, adapter call)
//!     → response.rs (JSON body, CORS envelope)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::InboundBody;
pub use server::{AppState, HttpServer};
