use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;

use chargeview_core::{ChargingStation, Connector, DomainError, Entity, StationId};
use chargeview_events::{MessageType, Payload, StationProjection};

use crate::event_store::{EventLog, EventLogError, StoredEvent};

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] EventLogError),
}

/// A stored event together with its decoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub event: StoredEvent,
    pub payload: Payload,
}

impl DecodedEvent {
    pub fn decode(event: StoredEvent) -> Result<Self, DomainError> {
        let payload = event.decode_payload()?;
        Ok(Self { event, payload })
    }

    pub fn message_type(&self) -> MessageType {
        self.payload.message_type()
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.event.occurred_at
    }

    /// Station named by the payload; empty ids count as absent.
    pub fn station_id(&self) -> Option<&StationId> {
        self.payload.station_id().filter(|id| !id.is_empty())
    }
}

/// Newest relevant event per message type for one station.
pub type LatestEvents = BTreeMap<MessageType, DecodedEvent>;

/// Charging-station projection computed by full rescan of an [`EventLog`].
///
/// Holds no derived state: every query reads the log afresh, so there is nothing to
/// invalidate when events are ingested. Each query costs O(events in the log).
#[derive(Debug)]
pub struct BasicProjection<L> {
    log: L,
}

impl<L> BasicProjection<L>
where
    L: EventLog,
{
    pub fn new(log: L) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Distinct station ids in first-encounter order.
    ///
    /// Only requests and notifications name a station; responses are skipped.
    /// Every event is decoded, so a malformed payload anywhere fails the scan.
    pub fn station_ids(&self) -> Result<Vec<StationId>, ProjectionError> {
        let mut seen = HashSet::new();
        let mut station_ids = Vec::new();

        for event in self.log.get_all()? {
            let decoded = DecodedEvent::decode(event)?;
            if let Some(station_id) = decoded.station_id() {
                if seen.insert(station_id.clone()) {
                    station_ids.push(station_id.clone());
                }
            }
        }

        Ok(station_ids)
    }

    /// Newest event of each message type relevant to a station.
    ///
    /// Pass 1 keeps the newest request/notification per type naming the station.
    /// Pass 2 follows each retained request's correlation id to its newest
    /// response; responses carry no station id and are attributed to the station
    /// only through that correlation.
    ///
    /// Returns an empty map for unknown stations.
    pub fn latest_events_for(&self, station_id: &StationId) -> Result<LatestEvents, ProjectionError> {
        let mut latest = LatestEvents::new();

        for event in self.log.get_all()? {
            let decoded = DecodedEvent::decode(event)?;
            if decoded.station_id() != Some(station_id) {
                continue;
            }
            retain_newest(&mut latest, decoded.message_type(), decoded);
        }

        let requests: Vec<_> = latest
            .values()
            .filter_map(|e| {
                e.message_type()
                    .response_type()
                    .map(|response_type| (response_type, e.event.correlation_id.clone()))
            })
            .collect();

        for (response_type, correlation_id) in requests {
            for event in self.log.get_by_correlation_id(&correlation_id)? {
                if event.message_type != response_type.as_str() {
                    continue;
                }
                let decoded = DecodedEvent::decode(event)?;
                retain_newest(&mut latest, response_type, decoded);
            }
        }

        Ok(latest)
    }

    fn latest_events_or_not_found(&self, station_id: &StationId) -> Result<LatestEvents, ProjectionError> {
        let latest = self.latest_events_for(station_id)?;
        if latest.is_empty() {
            return Err(DomainError::station_not_found(station_id).into());
        }
        Ok(latest)
    }
}

/// Keep `candidate` unless an event of the same type is at least as new.
///
/// Ties keep the event seen first.
fn retain_newest(latest: &mut LatestEvents, key: MessageType, candidate: DecodedEvent) {
    match latest.get(&key) {
        Some(existing) if existing.occurred_at() >= candidate.occurred_at() => {}
        _ => {
            latest.insert(key, candidate);
        }
    }
}

fn advance(latest: &mut Option<DateTime<Utc>>, at: DateTime<Utc>) {
    if latest.is_none_or(|t| at > t) {
        *latest = Some(at);
    }
}

impl<L> StationProjection for BasicProjection<L>
where
    L: EventLog,
{
    type Error = ProjectionError;

    fn num_charging_stations(&self) -> Result<usize, ProjectionError> {
        Ok(self.station_ids()?.len())
    }

    fn num_connectors(&self, station_id: &StationId) -> Result<usize, ProjectionError> {
        let latest = self.latest_events_or_not_found(station_id)?;

        let mut newest: Option<&DecodedEvent> = None;
        for event in latest.values().filter(|e| e.message_type().reports_connectors()) {
            if newest.is_none_or(|n| event.occurred_at() > n.occurred_at()) {
                newest = Some(event);
            }
        }

        Ok(newest
            .and_then(|e| e.payload.connector_count())
            .unwrap_or_default())
    }

    fn charging_station(&self, station_id: &StationId) -> Result<ChargingStation, ProjectionError> {
        let latest = self.latest_events_or_not_found(station_id)?;

        let mut connectors: Vec<Connector> = Vec::new();
        let mut updated_at: Option<DateTime<Utc>> = None;

        if let Some(notification) = latest.get(&MessageType::MeterValuesNotification) {
            let at = notification.occurred_at();
            for mv in notification.payload.meter_values().unwrap_or_default() {
                connectors.push(Connector {
                    id: mv.connector_id.clone(),
                    charging_station_id: station_id.clone(),
                    reading: mv.reading.clone(),
                    updated_at: at,
                });
            }
            updated_at = Some(at);
        }

        if let Some(response) = latest.get(&MessageType::MeterValuesResponse) {
            let at = response.occurred_at();
            for mv in response.payload.meter_values().unwrap_or_default() {
                match connectors.iter().position(|c| c.id() == &mv.connector_id) {
                    Some(idx) if connectors[idx].updated_at < at => {
                        connectors[idx].reading = mv.reading.clone();
                        connectors[idx].updated_at = at;
                        continue;
                    }
                    Some(_) => {
                        // Existing reading is at least as new: keep both entries.
                        tracing::debug!(
                            station_id = %station_id,
                            connector_id = %mv.connector_id,
                            "meter value not newer than current reading; appended as separate entry"
                        );
                    }
                    None => {}
                }
                connectors.push(Connector {
                    id: mv.connector_id.clone(),
                    charging_station_id: station_id.clone(),
                    reading: mv.reading.clone(),
                    updated_at: at,
                });
            }
            advance(&mut updated_at, at);
        }

        let num_connectors = if connectors.is_empty() {
            match latest.get(&MessageType::ConnectorListResponse) {
                Some(response) => {
                    advance(&mut updated_at, response.occurred_at());
                    response.payload.connector_count().unwrap_or_default()
                }
                None => 0,
            }
        } else {
            connectors.len()
        };

        Ok(ChargingStation {
            id: station_id.clone(),
            num_connectors,
            connectors,
            updated_at,
        })
    }

    fn charging_stations(&self) -> Result<Vec<ChargingStation>, ProjectionError> {
        let mut stations = Vec::new();

        for station_id in self.station_ids()? {
            match self.charging_station(&station_id) {
                Ok(station) => stations.push(station),
                Err(e) => {
                    tracing::warn!(station_id = %station_id, error = %e, "skipping charging station");
                }
            }
        }

        Ok(stations)
    }
}
