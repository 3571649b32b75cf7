//! Popup payload emitted on facility selection.
//!
//! The payload is data only; markup belongs to the UI shell outside the
//! core. The impacted-population figure is a deterministic function of the
//! facility identity so repeated clicks on the same facility produce the
//! same value (the source drew it from an unseeded RNG on every click).

use serde::{Deserialize, Serialize};

use crate::facility::Facility;

/// Upper bound (exclusive) for the synthesized impacted-population figure.
const IMPACTED_POPULATION_RANGE: u64 = 1000;

/// Facility details surfaced in the selection popup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopupPayload {
    /// Facility display name.
    pub name: String,
    /// Occupancy percentage ("Saturation" in the shell).
    pub occupancy_percent: f64,
    /// Professionals currently working.
    pub current_staff_count: f64,
    /// Synthesized impacted-population count, stable per facility.
    pub impacted_population: u64,
}

impl PopupPayload {
    /// Build the popup payload for a facility.
    pub fn for_facility(facility: &Facility) -> Self {
        Self {
            name: facility.name.clone(),
            occupancy_percent: facility.occupancy_percent,
            current_staff_count: facility.current_staff_count,
            impacted_population: impacted_population(facility),
        }
    }
}

/// Deterministic impacted-population figure in [0, 1000).
///
/// FNV-1a over the register id and name. Stable across runs and clicks,
/// plausible-looking per facility.
pub fn impacted_population(facility: &Facility) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in facility.id.bytes().chain(facility.name.bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash % IMPACTED_POPULATION_RANGE
}
