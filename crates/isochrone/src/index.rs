//! Name-to-polygon correlation index.
//!
//! Built once per store load and immutable afterwards; a reload requires a
//! full rebuild, never an incremental update. Keys pass through a single
//! normalization step (trim + lowercase) on both insert and lookup, so
//! "Hospital A " correlates with "hospital a". The source matched on exact
//! strings, which silently missed on whitespace and case differences.

use std::collections::HashMap;

use tracing::{debug, warn};

use capmap_common::Facility;

use crate::geojson::IsochroneFeature;

/// Which facility field joins against the polygon's `name` property.
///
/// The source carried two divergent conventions (display name vs. register
/// identifier) without resolving which is canonical; this makes the choice
/// explicit configuration. Display name is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationKey {
    /// Join on the facility display name.
    FacilityName,
    /// Join on the register identifier.
    RegisterId,
}

impl Default for CorrelationKey {
    fn default() -> Self {
        CorrelationKey::FacilityName
    }
}

impl CorrelationKey {
    /// Parse a key label from configuration.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "name" | "facility_name" => Some(CorrelationKey::FacilityName),
            "register_id" => Some(CorrelationKey::RegisterId),
            _ => None,
        }
    }

    /// Extract the join key from a facility.
    pub fn of<'a>(&self, facility: &'a Facility) -> &'a str {
        match self {
            CorrelationKey::FacilityName => &facility.name,
            CorrelationKey::RegisterId => &facility.id,
        }
    }
}

/// Normalize a correlation key: trim and case-fold.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Immutable mapping from normalized polygon name to polygon feature.
#[derive(Debug, Default)]
pub struct CorrelationIndex {
    map: HashMap<String, IsochroneFeature>,
}

impl CorrelationIndex {
    /// Build the index in one O(n) pass over the polygon sequence.
    ///
    /// Features without a `name` property cannot correlate and are skipped
    /// with a warning. Duplicate names resolve last-write-wins, matching
    /// the source format's lack of a uniqueness constraint.
    pub fn build(features: Vec<IsochroneFeature>) -> Self {
        let mut map = HashMap::with_capacity(features.len());
        for feature in features {
            match feature.name() {
                Some(name) => {
                    let key = normalize_key(name);
                    if map.insert(key, feature).is_some() {
                        debug!("duplicate polygon name replaced an earlier entry");
                    }
                }
                None => {
                    warn!("isochrone feature without a name property; skipping");
                }
            }
        }
        debug!(entries = map.len(), "correlation index built");
        Self { map }
    }

    /// Resolve a facility key to its polygon. O(1) average.
    pub fn lookup(&self, key: &str) -> Option<&IsochroneFeature> {
        self.map.get(&normalize_key(key))
    }

    /// Number of indexed polygons.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
