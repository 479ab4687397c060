//! Delivery domain shapes.
//!
//! Rows are owned by the data store. This module only builds what gets
//! written; it never caches or re-reads a record.

pub mod types;

pub use types::{
    AcceptancePatch, DeliveryId, DeliveryRequest, DeliveryStatus, DriverAcceptance,
    NewDeliveryRow, Rejection, COLLECTION,
};
