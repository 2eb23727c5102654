//! Derived charging-station read model.
//!
//! These types are never stored: they are recomputed from the event log on every
//! query and serialized for operators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{ConnectorId, StationId};

/// Current state of a charging station as derived from its event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    pub id: StationId,
    pub num_connectors: usize,
    pub connectors: Vec<Connector>,
    /// Occurrence time of the newest event that contributed to this view.
    ///
    /// `None` when only request events exist for the station.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Current reading of a single connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: ConnectorId,
    pub charging_station_id: StationId,
    pub reading: String,
    pub updated_at: DateTime<Utc>,
}

impl ChargingStation {
    /// Look up a connector by id.
    pub fn connector(&self, connector_id: &ConnectorId) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id() == connector_id)
    }
}

impl Entity for ChargingStation {
    type Id = StationId;

    fn id(&self) -> &StationId {
        &self.id
    }
}

impl Entity for Connector {
    type Id = ConnectorId;

    fn id(&self) -> &ConnectorId {
        &self.id
    }
}
