//! Styling rules for the facility and isochrone layers.

use serde::{Deserialize, Serialize};

/// Step-function color scale over occupancy percentage.
///
/// The facility circle stroke steps through three colors:
/// `[0, 50)` low, `[50, 75)` medium, `[75, ..)` high.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyScale {
    /// Color below `medium_threshold`.
    pub low_color: String,
    /// Color in `[medium_threshold, high_threshold)`.
    pub medium_color: String,
    /// Color at or above `high_threshold`.
    pub high_color: String,
    /// Lower bound of the medium band.
    pub medium_threshold: f64,
    /// Lower bound of the high band.
    pub high_threshold: f64,
}

impl Default for OccupancyScale {
    fn default() -> Self {
        Self {
            low_color: "#065f46".to_string(),
            medium_color: "#854d0e".to_string(),
            high_color: "#7f1d1d".to_string(),
            medium_threshold: 50.0,
            high_threshold: 75.0,
        }
    }
}

impl OccupancyScale {
    /// Resolve the stroke color for an occupancy value.
    ///
    /// NaN falls into the low band, matching the map engine's step
    /// expression behavior for missing values coalesced to 0.
    pub fn color_for(&self, occupancy: f64) -> &str {
        if occupancy >= self.high_threshold {
            &self.high_color
        } else if occupancy >= self.medium_threshold {
            &self.medium_color
        } else {
            &self.low_color
        }
    }
}

/// Categorical fill/outline rule for the isochrone layer.
///
/// One configured facility name renders in the alert colors; every other
/// isochrone renders in the normal colors. The default highlight carries
/// over the hard-coded campus from the source data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsochroneStyle {
    /// Facility name that gets the alert treatment.
    pub highlight_name: String,
    /// Fill color for the highlighted facility.
    pub highlight_fill: String,
    /// Outline color for the highlighted facility.
    pub highlight_outline: String,
    /// Fill color for every other facility.
    pub normal_fill: String,
    /// Outline color for every other facility.
    pub normal_outline: String,
    /// Fill opacity for the isochrone layer.
    pub fill_opacity: f64,
}

impl Default for IsochroneStyle {
    fn default() -> Self {
        Self {
            highlight_name: "Vall d'Hebron Barcelona Hospital Campus".to_string(),
            highlight_fill: "#ef4444".to_string(),
            highlight_outline: "#dc2626".to_string(),
            normal_fill: "#22c55e".to_string(),
            normal_outline: "#15803d".to_string(),
            fill_opacity: 0.35,
        }
    }
}

impl IsochroneStyle {
    /// Fill color for an isochrone by facility name.
    pub fn fill_for(&self, name: &str) -> &str {
        if name == self.highlight_name {
            &self.highlight_fill
        } else {
            &self.normal_fill
        }
    }

    /// Outline color for an isochrone by facility name.
    pub fn outline_for(&self, name: &str) -> &str {
        if name == self.highlight_name {
            &self.highlight_outline
        } else {
            &self.normal_outline
        }
    }
}
