//! Isochrone polygon loading and facility correlation.
//!
//! The store fetches and parses a GeoJSON FeatureCollection of travel-time
//! polygons; the index maps each polygon's `name` property to its feature
//! for O(1) lookup on facility click.

pub mod geojson;
pub mod index;
pub mod store;

pub use geojson::{IsochroneCollection, IsochroneFeature, IsochroneProperties};
pub use index::{normalize_key, CorrelationIndex, CorrelationKey};
pub use store::{load_isochrones, parse_collection};
