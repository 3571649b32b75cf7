//! End-to-end facility load with the degrade-to-empty failure policy.

use tracing::{info, warn};

use capmap_common::Facility;

use crate::decode::{decode_text, TextEncoding};
use crate::fetch::Fetcher;
use crate::normalize::normalize_rows;
use crate::tabular::{parse_table, Delimiter};

/// Fetch, decode, parse and normalize the facility dataset.
///
/// Any fetch or decode failure is logged and yields an empty sequence: the
/// pipeline continues with no facilities rather than crashing the view.
pub async fn load_facilities(
    fetcher: &Fetcher,
    uri: &str,
    encoding: TextEncoding,
    delimiter: Delimiter,
) -> Vec<Facility> {
    let raw = match fetcher.fetch(uri).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(uri = %uri, error = %e, "facility fetch failed; continuing with no facilities");
            return Vec::new();
        }
    };

    let text = match decode_text(&raw, encoding) {
        Ok(text) => text,
        Err(e) => {
            warn!(uri = %uri, error = %e, "facility decode failed; continuing with no facilities");
            return Vec::new();
        }
    };

    let rows = parse_table(&text, delimiter);
    let facilities = normalize_rows(&rows);
    info!(
        uri = %uri,
        rows = rows.len(),
        facilities = facilities.len(),
        "facility dataset loaded"
    );
    facilities
}
