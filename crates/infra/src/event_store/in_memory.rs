use std::collections::HashMap;
use std::sync::Mutex;

use chargeview_core::{CorrelationId, EventId};

use super::id_gen::{IdGenerator, SequentialIdGenerator};
use super::r#trait::{EventLog, EventLogError, StoredEvent, UncommittedEvent};

#[derive(Debug, Default)]
struct LogState {
    events: HashMap<EventId, StoredEvent>,
    /// First-insertion order of ids, so snapshots are reproducible.
    order: Vec<EventId>,
}

/// In-memory append-only event log.
///
/// A single mutex guards every operation, so all reads and writes are linearizable.
/// Lock hold times are bounded by one map access (or one clone of the log for
/// snapshots). Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryEventLog<G = SequentialIdGenerator> {
    state: Mutex<LogState>,
    ids: G,
}

impl InMemoryEventLog<SequentialIdGenerator> {
    pub fn new() -> Self {
        Self::with_id_generator(SequentialIdGenerator::new())
    }
}

impl Default for InMemoryEventLog<SequentialIdGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> InMemoryEventLog<G> {
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            state: Mutex::new(LogState::default()),
            ids,
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> Result<usize, EventLogError> {
        let state = self.state.lock().map_err(|_| EventLogError::LockPoisoned)?;
        Ok(state.events.len())
    }

    pub fn is_empty(&self) -> Result<bool, EventLogError> {
        Ok(self.len()? == 0)
    }
}

impl<G: IdGenerator> EventLog for InMemoryEventLog<G> {
    fn create(&self, event: UncommittedEvent) -> Result<EventId, EventLogError> {
        let mut state = self.state.lock().map_err(|_| EventLogError::LockPoisoned)?;

        let id = match event.id.clone() {
            Some(id) => id,
            // Skip over ids a producer already claimed explicitly.
            None => loop {
                let candidate = self.ids.next_id();
                if !state.events.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        let stored = event.into_stored(id.clone());
        match state.events.insert(id.clone(), stored) {
            Some(_) => tracing::warn!(event_id = %id, "event id reused; previous record replaced"),
            None => state.order.push(id.clone()),
        }

        Ok(id)
    }

    fn get(&self, id: &EventId) -> Result<StoredEvent, EventLogError> {
        let state = self.state.lock().map_err(|_| EventLogError::LockPoisoned)?;
        state
            .events
            .get(id)
            .cloned()
            .ok_or_else(|| EventLogError::NotFound(id.clone()))
    }

    fn get_by_correlation_id(
        &self,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<StoredEvent>, EventLogError> {
        let state = self.state.lock().map_err(|_| EventLogError::LockPoisoned)?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.events.get(id))
            .filter(|e| &e.correlation_id == correlation_id)
            .cloned()
            .collect())
    }

    fn get_all(&self) -> Result<Vec<StoredEvent>, EventLogError> {
        let state = self.state.lock().map_err(|_| EventLogError::LockPoisoned)?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.events.get(id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::event_store::UuidV7IdGenerator;

    fn mock_event(id: Option<&str>, correlation_id: &str) -> UncommittedEvent {
        UncommittedEvent {
            id: id.map(EventId::from),
            message_id: "message-1".into(),
            correlation_id: correlation_id.into(),
            message_type: "ConnectorListRequest".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            payload: json!({ "stationId": "station-1" }),
        }
    }

    #[test]
    fn create_without_id_assigns_one() {
        let log = InMemoryEventLog::new();

        let id = log.create(mock_event(None, "correlation-1")).unwrap();
        assert_eq!(id, EventId::new("event-1"));

        let stored = log.get(&id).unwrap();
        assert_eq!(stored.id, id);
    }

    #[test]
    fn create_with_id_keeps_it() {
        let log = InMemoryEventLog::new();

        let id = log.create(mock_event(Some("custom-id"), "correlation-1")).unwrap();
        assert_eq!(id, EventId::new("custom-id"));
        assert!(log.get(&EventId::new("custom-id")).is_ok());
    }

    #[test]
    fn round_trip_returns_equal_event() {
        let log = InMemoryEventLog::new();
        let event = mock_event(None, "correlation-1");

        let id = log.create(event.clone()).unwrap();
        assert_eq!(log.get(&id).unwrap(), event.into_stored(id));
    }

    #[test]
    fn generated_ids_skip_explicit_ones() {
        let log = InMemoryEventLog::new();

        log.create(mock_event(Some("event-1"), "correlation-1")).unwrap();
        let generated = log.create(mock_event(None, "correlation-1")).unwrap();

        assert_eq!(generated, EventId::new("event-2"));
        assert_eq!(log.len().unwrap(), 2);
    }

    #[test]
    fn recreating_an_id_replaces_the_record() {
        let log = InMemoryEventLog::new();

        log.create(mock_event(Some("event-1"), "correlation-1")).unwrap();
        log.create(mock_event(Some("event-1"), "correlation-2")).unwrap();

        assert_eq!(log.len().unwrap(), 1);
        let stored = log.get(&EventId::new("event-1")).unwrap();
        assert_eq!(stored.correlation_id, CorrelationId::new("correlation-2"));
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let log = InMemoryEventLog::new();

        let err = log.get(&EventId::new("missing")).unwrap_err();
        assert!(matches!(err, EventLogError::NotFound(id) if id.as_str() == "missing"));
    }

    #[test]
    fn get_by_correlation_id_filters() {
        let log = InMemoryEventLog::new();

        log.create(mock_event(Some("event-1"), "correlation-1")).unwrap();
        log.create(mock_event(Some("event-2"), "correlation-2")).unwrap();
        log.create(mock_event(Some("event-3"), "correlation-1")).unwrap();

        let mut ids: Vec<_> = log
            .get_by_correlation_id(&CorrelationId::new("correlation-1"))
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec![EventId::new("event-1"), EventId::new("event-3")]);
        assert!(
            log.get_by_correlation_id(&CorrelationId::new("correlation-9"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn get_all_returns_every_event() {
        let log = InMemoryEventLog::new();
        assert!(log.get_all().unwrap().is_empty());
        assert!(log.is_empty().unwrap());

        log.create(mock_event(None, "correlation-1")).unwrap();
        log.create(mock_event(None, "correlation-2")).unwrap();

        assert_eq!(log.get_all().unwrap().len(), 2);
    }

    #[test]
    fn uuid_generator_can_be_plugged_in() {
        let log = InMemoryEventLog::with_id_generator(UuidV7IdGenerator);

        let id = log.create(mock_event(None, "correlation-1")).unwrap();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn concurrent_creates_are_all_stored() {
        let log = Arc::new(InMemoryEventLog::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        log.create(mock_event(None, "correlation-1")).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(log.len().unwrap(), 400);
        assert_eq!(
            log.get_by_correlation_id(&CorrelationId::new("correlation-1"))
                .unwrap()
                .len(),
            400
        );
    }
}
