//! Row-to-facility normalization with asymmetric validation.
//!
//! A row is excluded only when its name is missing/empty or when either
//! coordinate does not parse as a finite number. Every other malformed
//! numeric field defaults instead of excluding the row: the renderer
//! tolerates a NaN wait time (it shows a non-numeric label) but cannot
//! place a marker without coordinates.

use tracing::debug;

use capmap_common::{Facility, LngLat};

use crate::tabular::RawRow;

/// Recognized source columns. Free-form address columns pass through the
/// raw rows untouched; the core never reads them.
pub mod columns {
    pub const NAME: &str = "name";
    pub const REGISTER_ID: &str = "register_id";
    pub const LATITUDE: &str = "geo_epgs_4326_lat";
    pub const LONGITUDE: &str = "geo_epgs_4326_lon";
    pub const WAIT_TIME: &str = "simulated_wait_time";
    pub const OCCUPANCY: &str = "occupancy_percentage";
    pub const CURRENT_OCCUPANCY: &str = "current_occupancy";
    pub const IS_HOSPITAL: &str = "is_hospital";
}

/// Normalize raw rows into facilities, preserving source order.
///
/// `display_index` is assigned 1-based among the rows that survive
/// validation, not among the raw input.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<Facility> {
    let mut facilities: Vec<Facility> = rows.iter().filter_map(normalize_row).collect();
    for (position, facility) in facilities.iter_mut().enumerate() {
        facility.display_index = position + 1;
    }
    debug!(
        raw = rows.len(),
        normalized = facilities.len(),
        "normalized facility rows"
    );
    facilities
}

/// Normalize one row, or exclude it.
fn normalize_row(row: &RawRow) -> Option<Facility> {
    let name = row.get(columns::NAME).map(|n| n.trim()).filter(|n| !n.is_empty())?;
    let lat = parse_finite(row.get(columns::LATITUDE))?;
    let lon = parse_finite(row.get(columns::LONGITUDE))?;

    Some(Facility {
        id: row
            .get(columns::REGISTER_ID)
            .cloned()
            .unwrap_or_default(),
        name: name.to_string(),
        position: LngLat::new(lon, lat),
        occupancy_percent: parse_or(row.get(columns::OCCUPANCY), 0.0),
        wait_time_minutes: parse_or(row.get(columns::WAIT_TIME), f64::NAN),
        current_staff_count: parse_or(row.get(columns::CURRENT_OCCUPANCY), 0.0),
        is_hospital: row
            .get(columns::IS_HOSPITAL)
            .map(|v| v.trim().to_string())
            .unwrap_or_default(),
        // Assigned after filtering.
        display_index: 0,
    })
}

/// Parse a coordinate field; only finite numbers pass.
fn parse_finite(value: Option<&String>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a numeric field, falling back to `default` on failure.
fn parse_or(value: Option<&String>, default: f64) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}
