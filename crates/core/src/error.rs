//! Domain error model.

use thiserror::Error;

use crate::id::StationId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures that follow from the event content
/// itself (unknown tags, malformed payloads, unknown stations). Storage concerns
/// belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No event references the requested charging station.
    #[error("charging station not found: {0}")]
    StationNotFound(StationId),

    /// A payload does not match the shape required by its declared message type.
    #[error("failed to decode {message_type} payload: {reason}")]
    Decode { message_type: String, reason: String },

    /// The message type tag is not part of the recognized set.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// A typed payload could not be converted back into its generic form.
    #[error("failed to encode payload: {0}")]
    Encode(String),
}

impl DomainError {
    pub fn station_not_found(station_id: &StationId) -> Self {
        Self::StationNotFound(station_id.clone())
    }

    pub fn decode(message_type: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            message_type: message_type.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_event_type(tag: impl Into<String>) -> Self {
        Self::UnknownEventType(tag.into())
    }

    pub fn encode(reason: impl ToString) -> Self {
        Self::Encode(reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = DomainError::station_not_found(&StationId::new("station-9"));
        assert_eq!(err.to_string(), "charging station not found: station-9");

        let err = DomainError::unknown_event_type("BootNotification");
        assert_eq!(err.to_string(), "unknown event type: BootNotification");

        let err = DomainError::decode("ConnectorListResponse", "missing field `numConnectors`");
        assert_eq!(
            err.to_string(),
            "failed to decode ConnectorListResponse payload: missing field `numConnectors`"
        );
    }
}
