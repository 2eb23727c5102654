//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A meter value reported
/// by a station is one: two readings for the same connector with the same text are
/// indistinguishable, whereas the connector itself is an [`Entity`](crate::Entity).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
