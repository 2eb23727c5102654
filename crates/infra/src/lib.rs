//! Infrastructure layer: event log, ingestion and projections.

pub mod event_store;
pub mod ingest;
pub mod projections;


pub use event_store::{EventLog, EventLogError, InMemoryEventLog, StoredEvent, UncommittedEvent};
pub use ingest::{AggregateIngestError, EventProcessor, IngestError, IngestGateway};
pub use projections::{BasicProjection, ProjectionError};
