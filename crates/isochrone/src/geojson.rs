//! GeoJSON types for the isochrone polygon collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use capmap_common::Geometry;

/// The polygon input file: a single GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsochroneCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Array of polygon features.
    pub features: Vec<IsochroneFeature>,
}

impl IsochroneCollection {
    /// Wrap a single feature, the shape the isochrone map source expects.
    pub fn single(feature: IsochroneFeature) -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: vec![feature],
        }
    }
}

/// One travel-time polygon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsochroneFeature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// Properties carrying the correlation key.
    pub properties: IsochroneProperties,

    /// Polygon or multi-polygon geometry, lon/lat order.
    pub geometry: Geometry,
}

impl IsochroneFeature {
    /// The correlation key, if the feature carries one.
    pub fn name(&self) -> Option<&str> {
        self.properties.name.as_deref()
    }
}

/// Feature properties. The `name` ties the polygon to a facility; anything
/// else the producer attached is kept for the fill-color expression but is
/// otherwise opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IsochroneProperties {
    /// Facility name this polygon belongs to. No uniqueness is enforced by
    /// the source format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Any additional properties from the source document.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_deserialize() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "Hospital A", "contour": 10},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[2.1, 41.3], [2.2, 41.3], [2.2, 41.4], [2.1, 41.3]]]
                }
            }]
        }"#;
        let collection: IsochroneCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].name(), Some("Hospital A"));
        assert!(collection.features[0].properties.extra.contains_key("contour"));
    }

    #[test]
    fn test_feature_without_name() {
        let json = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": []}
        }"#;
        let feature: IsochroneFeature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.name(), None);
    }
}
