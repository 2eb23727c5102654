use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use chargeview_core::DomainError;

/// Closed set of OCPP message types understood by the projection.
///
/// Requests and notifications carry the station id in their payload; responses
/// inherit it through the correlation id of the request they answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageType {
    ConnectorListRequest,
    ConnectorListResponse,
    MeterValuesRequest,
    MeterValuesResponse,
    MeterValuesNotification,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::ConnectorListRequest,
        MessageType::ConnectorListResponse,
        MessageType::MeterValuesRequest,
        MessageType::MeterValuesResponse,
        MessageType::MeterValuesNotification,
    ];

    /// Stable wire tag (the `messageType` field of an event record).
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::ConnectorListRequest => "ConnectorListRequest",
            MessageType::ConnectorListResponse => "ConnectorListResponse",
            MessageType::MeterValuesRequest => "MeterValuesRequest",
            MessageType::MeterValuesResponse => "MeterValuesResponse",
            MessageType::MeterValuesNotification => "MeterValuesNotification",
        }
    }

    /// The response type answering this request type, if this is a request.
    pub fn response_type(self) -> Option<MessageType> {
        match self {
            MessageType::ConnectorListRequest => Some(MessageType::ConnectorListResponse),
            MessageType::MeterValuesRequest => Some(MessageType::MeterValuesResponse),
            _ => None,
        }
    }

    /// Whether this type determines a connector count.
    pub fn reports_connectors(self) -> bool {
        matches!(
            self,
            MessageType::ConnectorListResponse
                | MessageType::MeterValuesResponse
                | MessageType::MeterValuesNotification
        )
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::unknown_event_type(s))
    }
}
