//! Event ingestion (producer side of the event log).
//!
//! The gateway is deliberately thin:
//!
//! ```text
//! UncommittedEvent
//!   ↓
//! 1. Resolve the message type tag (unknown tags are rejected)
//!   ↓
//! 2. Append to the event log (id assigned by the log if absent)
//! ```
//!
//! Payload shape is *not* validated here; that happens when the projection decodes
//! events. Batches are processed strictly in input order and a failing event never
//! stops the rest of the batch.

use core::fmt;

use thiserror::Error;

use chargeview_core::{DomainError, EventId};
use chargeview_events::MessageType;

use crate::event_store::{EventLog, EventLogError, UncommittedEvent};

/// Failure to ingest a single event.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] EventLogError),
}

/// One failed event within a batch.
#[derive(Debug)]
pub struct IngestFailure {
    /// Position of the event in the submitted batch.
    pub index: usize,
    /// Identifier supplied by the producer, if any.
    pub event_id: Option<EventId>,
    pub error: IngestError,
}

impl fmt::Display for IngestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event_id {
            Some(id) => write!(f, "event #{} ({id}): {}", self.index, self.error),
            None => write!(f, "event #{}: {}", self.index, self.error),
        }
    }
}

/// One or more events in a batch failed; the rest of the batch was still ingested.
#[derive(Debug)]
pub struct AggregateIngestError {
    pub failures: Vec<IngestFailure>,
    /// Identifiers of the events that were ingested successfully.
    pub ingested: Vec<EventId>,
}

impl fmt::Display for AggregateIngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} event(s) failed to ingest", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateIngestError {}

/// Accepts events one at a time.
pub trait EventProcessor {
    fn process_event(&self, event: UncommittedEvent) -> Result<EventId, IngestError>;
}

/// Ingest gateway in front of an [`EventLog`].
#[derive(Debug)]
pub struct IngestGateway<L> {
    log: L,
}

impl<L> IngestGateway<L>
where
    L: EventLog,
{
    pub fn new(log: L) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    /// Ingest a batch in input order, collecting every per-event failure.
    ///
    /// Returns the assigned identifiers when every event was ingested; otherwise a
    /// single [`AggregateIngestError`] describing all failures, reported only after
    /// the whole batch has been processed.
    pub fn process_batch(
        &self,
        events: impl IntoIterator<Item = UncommittedEvent>,
    ) -> Result<Vec<EventId>, AggregateIngestError> {
        let mut ingested = Vec::new();
        let mut failures = Vec::new();

        for (index, event) in events.into_iter().enumerate() {
            let event_id = event.id.clone();
            match self.process_event(event) {
                Ok(id) => ingested.push(id),
                Err(error) => {
                    tracing::warn!(index, error = %error, "failed to process event");
                    failures.push(IngestFailure {
                        index,
                        event_id,
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(ingested)
        } else {
            Err(AggregateIngestError { failures, ingested })
        }
    }
}

impl<L> EventProcessor for IngestGateway<L>
where
    L: EventLog,
{
    fn process_event(&self, event: UncommittedEvent) -> Result<EventId, IngestError> {
        let message_type: MessageType = event.message_type.parse()?;
        let id = self.log.create(event)?;
        tracing::debug!(event_id = %id, %message_type, "event ingested");
        Ok(id)
    }
}
