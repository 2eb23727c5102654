//! Strongly-typed identifiers used across the domain.
//!
//! OCPP identifiers are producer-assigned opaque strings, so every identifier is a
//! transparent `String` newtype. The wrappers exist to keep a station id from being
//! passed where a correlation id is expected.

use serde::{Deserialize, Serialize};

/// Identifier of an event record inside the event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

/// Producer-assigned identifier of a single protocol message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

/// Key linking a request message to its response message(s).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

/// Identifier of a charging station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

/// Identifier of a connector, unique within its charging station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Producers use the empty string to mean "not set".
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_newtype!(EventId);
impl_string_newtype!(MessageId);
impl_string_newtype!(CorrelationId);
impl_string_newtype!(StationId);
impl_string_newtype!(ConnectorId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = StationId::new("station-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"station-1\"");

        let back: StationId = serde_json::from_str("\"station-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn empty_id_is_detected() {
        assert!(EventId::new("").is_empty());
        assert!(!EventId::from("event-1").is_empty());
    }

    #[test]
    fn display_matches_inner_value() {
        let id = CorrelationId::from("correlation-7".to_string());
        assert_eq!(id.to_string(), "correlation-7");
        assert_eq!(id.as_str(), "correlation-7");
    }
}
