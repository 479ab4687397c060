//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (deployment environment overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the router and both adapters
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no global or ambient access
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Absent credentials are a per-request error, not a startup failure

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::DataStoreConfig;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::MessagingConfig;
pub use schema::ObservabilityConfig;
