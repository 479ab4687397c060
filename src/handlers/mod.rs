//! Route handlers.
//!
//! Handlers return the un-wrapped response; `http::server` applies the CORS
//! envelope and turns any `Err` into the 500 error body. Validation failures
//! are answered here with a 400 and never reach an adapter.

pub mod deliveries;
pub mod health;
pub mod whatsapp;
