//! GeoJSON geometry types used by the facility and isochrone layers.
//!
//! Coordinates follow the GeoJSON convention: [longitude, latitude],
//! WGS84 (EPSG:4326).

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lon: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// GeoJSON position: [lon, lat].
    pub fn to_position(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Geometry types carried by the map's sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A point geometry (facility markers).
    Point {
        /// Coordinates as [longitude, latitude].
        coordinates: [f64; 2],
    },

    /// A polygon geometry (isochrones).
    Polygon {
        /// Array of linear rings (first is exterior, rest are holes).
        coordinates: Vec<Vec<[f64; 2]>>,
    },

    /// A multi-polygon geometry (isochrones split across islands/barriers).
    MultiPolygon {
        /// Array of polygons, each an array of linear rings.
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

impl Geometry {
    /// Create a point geometry.
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }

    /// Create a polygon geometry from linear rings.
    pub fn polygon(coordinates: Vec<Vec<[f64; 2]>>) -> Self {
        Geometry::Polygon { coordinates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_roundtrip() {
        let geom = Geometry::point(2.19, 41.379);
        let json = serde_json::to_string(&geom).unwrap();
        assert!(json.contains("\"type\":\"Point\""));
        let back: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geom);
    }

    #[test]
    fn test_multipolygon_deserialize() {
        let json = r#"{
            "type": "MultiPolygon",
            "coordinates": [[[[2.1, 41.3], [2.2, 41.3], [2.2, 41.4], [2.1, 41.3]]]]
        }"#;
        let geom: Geometry = serde_json::from_str(json).unwrap();
        assert!(matches!(geom, Geometry::MultiPolygon { .. }));
    }
}
