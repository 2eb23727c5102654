use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use chargeview_core::{CorrelationId, DomainResult, EventId, MessageId};
use chargeview_events::{MessageType, Payload};
use std::sync::Arc;

/// An event ready to be appended to the log (identifier possibly not yet assigned).
///
/// `UncommittedEvent` is the producer-side shape: it is what the JSON input file
/// contains and what the ingest gateway accepts. The log turns it into a
/// [`StoredEvent`] by filling in the identifier.
///
/// An absent or empty `id` both mean "let the log assign one".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncommittedEvent {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<EventId>,
    pub message_id: MessageId,
    pub correlation_id: CorrelationId,

    /// Wire tag; kept as a string so unknown tags survive parsing and can be
    /// rejected per event rather than failing the whole input.
    pub message_type: String,
    pub occurred_at: DateTime<Utc>,

    pub payload: JsonValue,
}

/// An immutable event record as held by the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    pub id: EventId,
    pub message_id: MessageId,
    pub correlation_id: CorrelationId,
    pub message_type: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: JsonValue,
}

impl UncommittedEvent {
    /// Convenience constructor from a typed payload.
    ///
    /// The message type tag is taken from the payload variant so the two can never
    /// disagree.
    pub fn from_payload(
        message_id: impl Into<MessageId>,
        correlation_id: impl Into<CorrelationId>,
        occurred_at: DateTime<Utc>,
        payload: &Payload,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: None,
            message_id: message_id.into(),
            correlation_id: correlation_id.into(),
            message_type: payload.message_type().as_str().to_string(),
            occurred_at,
            payload: payload.to_json()?,
        })
    }

    pub fn with_id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach the identifier chosen by the log.
    pub fn into_stored(self, id: EventId) -> StoredEvent {
        StoredEvent {
            id,
            message_id: self.message_id,
            correlation_id: self.correlation_id,
            message_type: self.message_type,
            occurred_at: self.occurred_at,
            payload: self.payload,
        }
    }
}

impl StoredEvent {
    /// Resolve the wire tag against the closed set of message types.
    pub fn kind(&self) -> DomainResult<MessageType> {
        self.message_type.parse()
    }

    /// Decode the generic payload into its typed form.
    pub fn decode_payload(&self) -> DomainResult<Payload> {
        Payload::decode(&self.message_type, &self.payload)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<EventId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<EventId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_empty()))
}

/// Event log operation error.
///
/// These are **infrastructure errors**, as opposed to the domain errors raised while
/// interpreting event content.
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("event not found: {0}")]
    NotFound(EventId),

    #[error("event log lock poisoned")]
    LockPoisoned,
}

/// Append-only log of immutable event records.
///
/// ## Semantics
///
/// - `create` stores a record, assigning an identifier when the event has none.
///   Re-creating an existing identifier replaces the record; producers must not
///   reuse identifiers.
/// - `get` fails with [`EventLogError::NotFound`] for unknown identifiers.
/// - `get_by_correlation_id` returns every record sharing the correlation id
///   (possibly none).
/// - `get_all` returns a snapshot of every record.
///
/// Order of returned collections is unspecified; callers that need a particular
/// order must impose it themselves.
///
/// ## Implementation Requirements
///
/// Every operation must be atomic with respect to every other: a concurrent reader
/// never observes a partially applied `create`.
pub trait EventLog: Send + Sync {
    /// Append an event, returning its identifier.
    fn create(&self, event: UncommittedEvent) -> Result<EventId, EventLogError>;

    /// Load one event by identifier.
    fn get(&self, id: &EventId) -> Result<StoredEvent, EventLogError>;

    /// Load every event sharing a correlation id.
    fn get_by_correlation_id(
        &self,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<StoredEvent>, EventLogError>;

    /// Snapshot of the full log.
    fn get_all(&self) -> Result<Vec<StoredEvent>, EventLogError>;
}

impl<S> EventLog for Arc<S>
where
    S: EventLog + ?Sized,
{
    fn create(&self, event: UncommittedEvent) -> Result<EventId, EventLogError> {
        (**self).create(event)
    }

    fn get(&self, id: &EventId) -> Result<StoredEvent, EventLogError> {
        (**self).get(id)
    }

    fn get_by_correlation_id(
        &self,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<StoredEvent>, EventLogError> {
        (**self).get_by_correlation_id(correlation_id)
    }

    fn get_all(&self) -> Result<Vec<StoredEvent>, EventLogError> {
        (**self).get_all()
    }
}
