//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (table lookup)
//!     → Return: Route (NotFound when nothing matches)
//!     → http::server dispatches the Route to a handler
//! ```
//!
//! # Design Decisions
//! - Routes fixed at compile time, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod router;

pub use router::{MethodFilter, Route, RouteTable};
