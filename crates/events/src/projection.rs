use chargeview_core::{ChargingStation, StationId};

/// A projection derives the charging-station read model from the event history.
///
/// Implementations hold no derived state of their own: every call recomputes its
/// answer from the events currently in the log, so a result can never be stale
/// with respect to the log it was computed from.
///
/// ## Error Handling
///
/// Decode and lookup failures are returned to the caller. The one exception is
/// [`charging_stations`](StationProjection::charging_stations), which skips a
/// station whose reconstruction fails instead of failing the whole listing.
pub trait StationProjection {
    type Error: core::fmt::Debug;

    /// Number of distinct charging stations referenced by the log.
    fn num_charging_stations(&self) -> Result<usize, Self::Error>;

    /// Connector count of a station, taken from its newest count-bearing event.
    fn num_connectors(&self, station_id: &StationId) -> Result<usize, Self::Error>;

    /// Full reconstruction of one station.
    fn charging_station(&self, station_id: &StationId) -> Result<ChargingStation, Self::Error>;

    /// Every station that can be reconstructed, in discovery order.
    fn charging_stations(&self) -> Result<Vec<ChargingStation>, Self::Error>;
}
