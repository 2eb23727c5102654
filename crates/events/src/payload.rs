//! Typed event payloads.
//!
//! Event records arrive with a generic JSON payload whose shape depends on the
//! `messageType` tag. [`Payload::decode`] resolves the tag once and converts the JSON
//! into the matching struct; nothing past this point looks at raw JSON.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use chargeview_core::{ConnectorId, DomainError, DomainResult, StationId, ValueObject};

use crate::message_type::MessageType;

/// A single connector reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValue {
    pub connector_id: ConnectorId,
    pub reading: String,
}

impl ValueObject for MeterValue {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorListRequestPayload {
    /// Missing on the wire decodes as empty, which discovery skips.
    #[serde(default)]
    pub station_id: StationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorListResponsePayload {
    #[serde(default, deserialize_with = "whole_number")]
    pub num_connectors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesRequestPayload {
    #[serde(default)]
    pub station_id: StationId,
    /// Restricts the request to one connector; absent means all connectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<ConnectorId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesResponsePayload {
    #[serde(default)]
    pub meter_values: Vec<MeterValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesNotificationPayload {
    #[serde(default)]
    pub station_id: StationId,
    #[serde(default)]
    pub meter_values: Vec<MeterValue>,
}

/// Producers emit counts as JSON numbers that may carry a zero fraction (`2.0`).
fn whole_number<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let n = f64::deserialize(deserializer)?;
    if n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 {
        Ok(n as usize)
    } else {
        Err(D::Error::custom(format!("expected a non-negative whole number, got {n}")))
    }
}

/// Payload of an event, discriminated by its message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    ConnectorListRequest(ConnectorListRequestPayload),
    ConnectorListResponse(ConnectorListResponsePayload),
    MeterValuesRequest(MeterValuesRequestPayload),
    MeterValuesResponse(MeterValuesResponsePayload),
    MeterValuesNotification(MeterValuesNotificationPayload),
}

impl Payload {
    /// Decode a generic JSON payload according to its wire tag.
    ///
    /// Fails with [`DomainError::UnknownEventType`] for tags outside the closed set
    /// and [`DomainError::Decode`] when the JSON does not fit the tag's shape.
    pub fn decode(message_type: &str, value: &JsonValue) -> DomainResult<Self> {
        let message_type: MessageType = message_type.parse()?;
        Self::decode_as(message_type, value)
    }

    /// Decode a generic JSON payload for an already-resolved message type.
    pub fn decode_as(message_type: MessageType, value: &JsonValue) -> DomainResult<Self> {
        let err = |e: serde_json::Error| DomainError::decode(message_type.as_str(), e);

        Ok(match message_type {
            MessageType::ConnectorListRequest => {
                Payload::ConnectorListRequest(Deserialize::deserialize(value).map_err(err)?)
            }
            MessageType::ConnectorListResponse => {
                Payload::ConnectorListResponse(Deserialize::deserialize(value).map_err(err)?)
            }
            MessageType::MeterValuesRequest => {
                Payload::MeterValuesRequest(Deserialize::deserialize(value).map_err(err)?)
            }
            MessageType::MeterValuesResponse => {
                Payload::MeterValuesResponse(Deserialize::deserialize(value).map_err(err)?)
            }
            MessageType::MeterValuesNotification => {
                Payload::MeterValuesNotification(Deserialize::deserialize(value).map_err(err)?)
            }
        })
    }

    /// Convert back into the generic JSON form stored in event records.
    pub fn to_json(&self) -> DomainResult<JsonValue> {
        let value = match self {
            Payload::ConnectorListRequest(p) => serde_json::to_value(p),
            Payload::ConnectorListResponse(p) => serde_json::to_value(p),
            Payload::MeterValuesRequest(p) => serde_json::to_value(p),
            Payload::MeterValuesResponse(p) => serde_json::to_value(p),
            Payload::MeterValuesNotification(p) => serde_json::to_value(p),
        };
        value.map_err(DomainError::encode)
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Payload::ConnectorListRequest(_) => MessageType::ConnectorListRequest,
            Payload::ConnectorListResponse(_) => MessageType::ConnectorListResponse,
            Payload::MeterValuesRequest(_) => MessageType::MeterValuesRequest,
            Payload::MeterValuesResponse(_) => MessageType::MeterValuesResponse,
            Payload::MeterValuesNotification(_) => MessageType::MeterValuesNotification,
        }
    }

    /// Station named directly by the payload; `None` for responses.
    pub fn station_id(&self) -> Option<&StationId> {
        match self {
            Payload::ConnectorListRequest(p) => Some(&p.station_id),
            Payload::MeterValuesRequest(p) => Some(&p.station_id),
            Payload::MeterValuesNotification(p) => Some(&p.station_id),
            Payload::ConnectorListResponse(_) | Payload::MeterValuesResponse(_) => None,
        }
    }

    /// Meter values reported by a notification or response.
    pub fn meter_values(&self) -> Option<&[MeterValue]> {
        match self {
            Payload::MeterValuesResponse(p) => Some(&p.meter_values),
            Payload::MeterValuesNotification(p) => Some(&p.meter_values),
            _ => None,
        }
    }

    /// Connector count implied by this payload, for types that report one.
    pub fn connector_count(&self) -> Option<usize> {
        match self {
            Payload::ConnectorListResponse(p) => Some(p.num_connectors),
            Payload::MeterValuesResponse(p) => Some(p.meter_values.len()),
            Payload::MeterValuesNotification(p) => Some(p.meter_values.len()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_notification_with_meter_values() {
        let payload = Payload::decode(
            "MeterValuesNotification",
            &json!({
                "stationId": "station-1",
                "meterValues": [
                    { "connectorId": "c1", "reading": "100" },
                    { "connectorId": "c2", "reading": "200" }
                ]
            }),
        )
        .unwrap();

        assert_eq!(payload.message_type(), MessageType::MeterValuesNotification);
        assert_eq!(payload.station_id(), Some(&StationId::new("station-1")));
        assert_eq!(payload.connector_count(), Some(2));
        assert_eq!(
            payload.meter_values().unwrap()[1],
            MeterValue {
                connector_id: ConnectorId::new("c2"),
                reading: "200".to_string(),
            }
        );
    }

    #[test]
    fn missing_meter_values_decode_as_empty() {
        let payload =
            Payload::decode("MeterValuesNotification", &json!({ "stationId": "station-1" })).unwrap();
        assert_eq!(payload.meter_values(), Some(&[][..]));

        let payload = Payload::decode("MeterValuesResponse", &json!({})).unwrap();
        assert_eq!(payload.connector_count(), Some(0));
    }

    #[test]
    fn meter_values_request_keeps_optional_connector() {
        let payload = Payload::decode(
            "MeterValuesRequest",
            &json!({ "stationId": "station-1", "connectorId": "c3" }),
        )
        .unwrap();

        match payload {
            Payload::MeterValuesRequest(p) => {
                assert_eq!(p.connector_id, Some(ConnectorId::new("c3")));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn responses_have_no_station_id() {
        let payload =
            Payload::decode("ConnectorListResponse", &json!({ "numConnectors": 4 })).unwrap();
        assert_eq!(payload.station_id(), None);
        assert_eq!(payload.connector_count(), Some(4));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = Payload::decode("Heartbeat", &json!({})).unwrap_err();
        assert_eq!(err, DomainError::UnknownEventType("Heartbeat".to_string()));
    }

    #[test]
    fn connector_count_accepts_integral_floats() {
        let payload =
            Payload::decode("ConnectorListResponse", &json!({ "numConnectors": 2.0 })).unwrap();
        assert_eq!(payload.connector_count(), Some(2));

        assert!(Payload::decode("ConnectorListResponse", &json!({ "numConnectors": 2.5 })).is_err());
        assert!(Payload::decode("ConnectorListResponse", &json!({ "numConnectors": -1 })).is_err());
    }

    #[test]
    fn missing_station_id_decodes_as_empty() {
        let payload = Payload::decode("ConnectorListRequest", &json!({})).unwrap();
        assert!(payload.station_id().unwrap().is_empty());

        let payload =
            Payload::decode("MeterValuesNotification", &json!({ "meterValues": [] })).unwrap();
        assert!(payload.station_id().unwrap().is_empty());
    }

    #[test]
    fn mismatched_shape_is_a_decode_error() {
        let err = Payload::decode("ConnectorListResponse", &json!({ "numConnectors": "two" }))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Decode { ref message_type, .. } if message_type == "ConnectorListResponse"
        ));

        let err = Payload::decode("ConnectorListRequest", &json!("station-1")).unwrap_err();
        assert!(matches!(err, DomainError::Decode { .. }));
    }

    #[test]
    fn to_json_produces_wire_shape() {
        let payload = Payload::MeterValuesRequest(MeterValuesRequestPayload {
            station_id: StationId::new("station-1"),
            connector_id: None,
        });
        assert_eq!(payload.to_json().unwrap(), json!({ "stationId": "station-1" }));
    }
}
