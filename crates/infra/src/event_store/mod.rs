//! Append-only event log boundary.
//!
//! This module defines the storage-facing abstraction the projection reads from,
//! together with an in-memory implementation and identifier generators.

pub mod id_gen;
pub mod in_memory;
pub mod r#trait;

pub use id_gen::{IdGenerator, SequentialIdGenerator, UuidV7IdGenerator};
pub use in_memory::InMemoryEventLog;
pub use r#trait::{EventLog, EventLogError, StoredEvent, UncommittedEvent};
