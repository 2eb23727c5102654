//! OCPP event vocabulary: message types, typed payloads and the projection contract.

pub mod message_type;
pub mod payload;
pub mod projection;

pub use message_type::MessageType;
pub use payload::{
    ConnectorListRequestPayload, ConnectorListResponsePayload, MeterValue,
    MeterValuesNotificationPayload, MeterValuesRequestPayload, MeterValuesResponsePayload,
    Payload,
};
pub use projection::StationProjection;
