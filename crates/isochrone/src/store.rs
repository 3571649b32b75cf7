//! Isochrone store: fetch + decode + parse of the polygon collection.

use tracing::{info, warn};

use capmap_common::CapResult;
use ingestion::{decode_text, Fetcher, TextEncoding};

use crate::geojson::{IsochroneCollection, IsochroneFeature};

/// Parse a decoded GeoJSON document into its features.
///
/// No partial-document recovery: a malformed document fails as a whole.
pub fn parse_collection(text: &str) -> CapResult<Vec<IsochroneFeature>> {
    let collection: IsochroneCollection = serde_json::from_str(text)?;
    Ok(collection.features)
}

/// Fetch, decode and parse the isochrone dataset.
///
/// Follows the same fetch+decode pattern as the tabular ingestor, including
/// the failure policy: any error is logged and yields an empty sequence so
/// clicks degrade to lookup misses instead of faulting the view.
pub async fn load_isochrones(
    fetcher: &Fetcher,
    uri: &str,
    encoding: TextEncoding,
) -> Vec<IsochroneFeature> {
    let raw = match fetcher.fetch(uri).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(uri = %uri, error = %e, "isochrone fetch failed; continuing with no polygons");
            return Vec::new();
        }
    };

    let text = match decode_text(&raw, encoding) {
        Ok(text) => text,
        Err(e) => {
            warn!(uri = %uri, error = %e, "isochrone decode failed; continuing with no polygons");
            return Vec::new();
        }
    };

    match parse_collection(&text) {
        Ok(features) => {
            info!(uri = %uri, polygons = features.len(), "isochrone dataset loaded");
            features
        }
        Err(e) => {
            warn!(uri = %uri, error = %e, "isochrone parse failed; continuing with no polygons");
            Vec::new()
        }
    }
}
