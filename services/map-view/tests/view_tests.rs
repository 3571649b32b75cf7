//! End-to-end view tests: datasets on disk through to click handling.

use std::io::Write;
use std::sync::Arc;

use tokio::sync::RwLock;

use ingestion::{load_facilities, Fetcher, TextEncoding};
use isochrone::{load_isochrones, CorrelationIndex};
use map_view::{
    HeadlessEngine, InteractionController, IsochroneLayerState, MapView, MapViewConfig,
    SharedIndex, ViewState,
};

fn utf16le_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut raw = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        raw.extend_from_slice(&unit.to_le_bytes());
    }
    file.write_all(&raw).unwrap();
    file
}

const CSV: &str = "name,register_id,geo_epgs_4326_lat,geo_epgs_4326_lon,occupancy_percentage,simulated_wait_time,current_occupancy\n\
    Hospital A,H001,41.4,2.2,80,25,12\n\
    ,H002,41.3,2.1,50,10,4\n\
    Clinic B,H003,41.35,2.15,nope,,\n";

const GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {"name": "Hospital A"},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[2.1, 41.3], [2.3, 41.3], [2.3, 41.5], [2.1, 41.3]]]
        }
    }]
}"#;

async fn load_fixture() -> (Vec<capmap_common::Facility>, SharedIndex) {
    let csv = utf16le_file(CSV);
    let geojson = utf16le_file(GEOJSON);
    let fetcher = Fetcher::new().unwrap();

    let config = MapViewConfig::default();
    let facilities = load_facilities(
        &fetcher,
        csv.path().to_str().unwrap(),
        TextEncoding::Utf16Le,
        config.facility_source.field_delimiter().unwrap(),
    )
    .await;

    let features = load_isochrones(
        &fetcher,
        geojson.path().to_str().unwrap(),
        TextEncoding::Utf16Le,
    )
    .await;
    let index: SharedIndex = Arc::new(RwLock::new(Some(CorrelationIndex::build(features))));
    (facilities, index)
}

#[tokio::test]
async fn test_pipeline_to_click_roundtrip() {
    let (facilities, index) = load_fixture().await;

    // Nameless row excluded; malformed numerics defaulted, rows kept.
    assert_eq!(facilities.len(), 2);
    assert_eq!(facilities[0].name, "Hospital A");
    assert_eq!(facilities[0].display_index, 1);
    assert_eq!(facilities[1].name, "Clinic B");
    assert_eq!(facilities[1].occupancy_percent, 0.0);
    assert!(facilities[1].wait_time_minutes.is_nan());

    let mut view = MapView::new(MapViewConfig::default());
    assert!(view.open(HeadlessEngine::new()));
    view.set_facilities(&facilities).unwrap();

    let mut state = ViewState::new();
    state.set_facilities(facilities.clone());

    let controller = InteractionController::new(
        index,
        MapViewConfig::default().resolve_correlation_key().unwrap(),
    );

    // Hit: Hospital A has a polygon.
    let payload = controller
        .on_facility_click(&mut view, &mut state, &facilities[0])
        .await;
    assert_eq!(
        view.isochrone_state(),
        &IsochroneLayerState::Present("Hospital A".to_string())
    );
    assert_eq!(payload.occupancy_percent, 80.0);
    assert_eq!(payload.current_staff_count, 12.0);

    // The shown polygon is exactly the matching one.
    let data = view
        .engine()
        .unwrap()
        .source_data("isochrone")
        .unwrap();
    assert_eq!(data["features"].as_array().unwrap().len(), 1);
    assert_eq!(data["features"][0]["properties"]["name"], "Hospital A");

    // Miss: Clinic B has none, layer comes down.
    controller
        .on_facility_click(&mut view, &mut state, &facilities[1])
        .await;
    assert_eq!(view.isochrone_state(), &IsochroneLayerState::Absent);
    assert_eq!(state.selected_facility().unwrap().name, "Clinic B");
}

#[tokio::test]
async fn test_missing_datasets_degrade_to_empty_view() {
    let fetcher = Fetcher::new().unwrap();
    let facilities = load_facilities(
        &fetcher,
        "/no/such/facilities.csv",
        TextEncoding::Utf16Le,
        ingestion::Delimiter::Comma,
    )
    .await;
    let features =
        load_isochrones(&fetcher, "/no/such/isochrones.geojson", TextEncoding::Utf16Le).await;

    assert!(facilities.is_empty());
    assert!(features.is_empty());

    // The view still opens and renders nothing rather than faulting.
    let mut view = MapView::new(MapViewConfig::default());
    view.open(HeadlessEngine::new());
    let mut state = ViewState::new();
    state.set_facilities(facilities);
    assert!(state.facilities().is_empty());
    assert_eq!(view.isochrone_state(), &IsochroneLayerState::Absent);
}
