//! Event identifier generation.
//!
//! Identifiers come from an explicit source rather than being derived from the
//! current log size, so they stay unique even if records are ever removed.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use chargeview_core::EventId;

/// Source of identifiers for events submitted without one.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> EventId;
}

/// Monotonic `event-<n>` identifiers, starting at `event-1`.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> EventId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        EventId::new(format!("event-{n}"))
    }
}

/// Time-ordered UUIDv7 identifiers.
#[derive(Debug, Default)]
pub struct UuidV7IdGenerator;

impl IdGenerator for UuidV7IdGenerator {
    fn next_id(&self) -> EventId {
        EventId::new(Uuid::now_v7().to_string())
    }
}
