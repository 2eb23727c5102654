//! Projection implementations (read model builders).
//!
//! Projections here are **stateless**: they keep no read model between calls and
//! rebuild the requested view from the full event log on every query.

pub mod charging_stations;

pub use charging_stations::{BasicProjection, DecodedEvent, LatestEvents, ProjectionError};
