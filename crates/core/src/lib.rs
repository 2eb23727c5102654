//! `chargeview-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model and the derived station read model.

pub mod entity;
pub mod error;
pub mod id;
pub mod station;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ConnectorId, CorrelationId, EventId, MessageId, StationId};
pub use station::{ChargingStation, Connector};
pub use value_object::ValueObject;
