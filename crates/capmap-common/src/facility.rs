//! Facility entity produced by the normalization pipeline.

use serde::{Deserialize, Serialize};

use crate::geo::LngLat;

/// A healthcare facility with location, capacity and staffing attributes.
///
/// Produced by the normalizer from one tabular row. A facility only exists
/// if the row carried a non-empty name and finite coordinates; every other
/// field is defaulted on parse failure rather than excluding the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    /// Register identifier from the source data.
    pub id: String,

    /// Display name, trimmed. Primary correlation key for isochrone lookup.
    pub name: String,

    /// WGS84 position.
    pub position: LngLat,

    /// Capacity utilization percentage. Conceptually [0, 100] but the
    /// source does not enforce the range and neither do we.
    pub occupancy_percent: f64,

    /// Simulated wait time in minutes. May be NaN when the source field
    /// is missing or malformed; the label layer tolerates it.
    pub wait_time_minutes: f64,

    /// Professionals currently working. 0 on parse failure.
    pub current_staff_count: f64,

    /// Boolean-like flag from the source ("1", "true", "", ...), trimmed.
    pub is_hospital: String,

    /// 1-based position among the normalized output, in source row order.
    pub display_index: usize,
}

impl Facility {
    /// GeoJSON position for this facility: [lon, lat].
    pub fn to_position(&self) -> [f64; 2] {
        self.position.to_position()
    }
}
