//! Edge HTTP gateway between the VAIJÁ apps, the delivery data store and
//! the WhatsApp messaging provider.

pub mod config;
pub mod datastore;
pub mod deliveries;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod messaging;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
