//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Derived read models (stations, connectors) are entities: two snapshots with the
/// same identifier describe the same physical thing at different points in time.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
