//! Facility click handling.
//!
//! Resolves the clicked facility against the correlation index, drives the
//! isochrone layer state machine on the view, records the selection and
//! produces the popup payload. The index lives behind a shared slot that
//! the isochrone load task fills whenever it finishes; a click that lands
//! before then sees `None` and is treated exactly like a lookup miss.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use capmap_common::{Facility, PopupPayload};
use isochrone::{CorrelationIndex, CorrelationKey};

use crate::engine::MapEngine;
use crate::renderer::MapView;
use crate::state::ViewState;

/// Correlation index slot, filled once the isochrone load resolves.
pub type SharedIndex = Arc<RwLock<Option<CorrelationIndex>>>;

/// Handles facility clicks for one map view.
pub struct InteractionController {
    index: SharedIndex,
    key: CorrelationKey,
}

impl InteractionController {
    pub fn new(index: SharedIndex, key: CorrelationKey) -> Self {
        Self { index, key }
    }

    /// Handle a click on a facility marker.
    ///
    /// Layer mutations that fail are logged and swallowed; data problems
    /// degrade the isochrone layer, they never fault the interaction.
    /// Always returns the popup payload and updates the selection.
    pub async fn on_facility_click<E: MapEngine>(
        &self,
        view: &mut MapView<E>,
        state: &mut ViewState,
        facility: &Facility,
    ) -> PopupPayload {
        let key = self.key.of(facility);
        let guard = self.index.read().await;

        let hit = guard.as_ref().and_then(|index| index.lookup(key));
        match hit {
            Some(feature) => {
                if let Err(e) = view.show_isochrone(&facility.name, feature) {
                    warn!(facility = %facility.name, error = %e, "failed to show isochrone");
                }
            }
            None => {
                debug!(facility = %facility.name, key = %key, "no matching isochrone");
                if let Err(e) = view.clear_isochrone() {
                    warn!(facility = %facility.name, error = %e, "failed to clear isochrone");
                }
            }
        }
        drop(guard);

        state.select(facility.clone());
        PopupPayload::for_facility(facility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapViewConfig;
    use crate::engine::HeadlessEngine;
    use crate::renderer::{ISOCHRONE_FILL_LAYER, ISOCHRONE_SOURCE};
    use crate::state::IsochroneLayerState;
    use capmap_common::{Geometry, LngLat};
    use isochrone::{IsochroneFeature, IsochroneProperties};

    fn facility(name: &str) -> Facility {
        Facility {
            id: "H001".to_string(),
            name: name.to_string(),
            position: LngLat::new(2.2, 41.4),
            occupancy_percent: 80.0,
            wait_time_minutes: 12.0,
            current_staff_count: 3.0,
            is_hospital: "1".to_string(),
            display_index: 1,
        }
    }

    fn feature(name: &str, lon: f64) -> IsochroneFeature {
        IsochroneFeature {
            type_: "Feature".to_string(),
            properties: IsochroneProperties {
                name: Some(name.to_string()),
                extra: Default::default(),
            },
            geometry: Geometry::polygon(vec![vec![
                [lon, 41.3],
                [lon + 0.1, 41.3],
                [lon + 0.1, 41.4],
                [lon, 41.3],
            ]]),
        }
    }

    fn loaded_index(features: Vec<IsochroneFeature>) -> SharedIndex {
        Arc::new(RwLock::new(Some(CorrelationIndex::build(features))))
    }

    fn open_view() -> MapView<HeadlessEngine> {
        let mut view = MapView::new(MapViewConfig::default());
        view.open(HeadlessEngine::new());
        view
    }

    #[tokio::test]
    async fn test_click_hit_shows_isochrone() {
        let index = loaded_index(vec![feature("Hospital A", 2.1)]);
        let controller = InteractionController::new(index, CorrelationKey::FacilityName);
        let mut view = open_view();
        let mut state = ViewState::new();

        let payload = controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;

        assert_eq!(
            view.isochrone_state(),
            &IsochroneLayerState::Present("Hospital A".to_string())
        );
        let engine = view.engine().unwrap();
        assert!(engine.has_layer(ISOCHRONE_FILL_LAYER));
        let data = engine.source_data(ISOCHRONE_SOURCE).unwrap();
        assert_eq!(data["features"][0]["properties"]["name"], "Hospital A");

        assert_eq!(payload.name, "Hospital A");
        assert_eq!(state.selected_facility().unwrap().name, "Hospital A");
    }

    #[tokio::test]
    async fn test_second_hit_updates_source_data() {
        let index = loaded_index(vec![feature("Hospital A", 2.1), feature("Hospital B", 2.5)]);
        let controller = InteractionController::new(index, CorrelationKey::FacilityName);
        let mut view = open_view();
        let mut state = ViewState::new();

        controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital B"))
            .await;

        assert_eq!(
            view.isochrone_state(),
            &IsochroneLayerState::Present("Hospital B".to_string())
        );
        let engine = view.engine().unwrap();
        // One layer throughout; only the source data changed.
        assert_eq!(
            engine
                .layer_ids()
                .iter()
                .filter(|id| **id == ISOCHRONE_FILL_LAYER)
                .count(),
            1
        );
        let data = engine.source_data(ISOCHRONE_SOURCE).unwrap();
        assert_eq!(data["features"][0]["properties"]["name"], "Hospital B");
    }

    #[tokio::test]
    async fn test_miss_removes_layer_and_source() {
        let index = loaded_index(vec![feature("Hospital A", 2.1)]);
        let controller = InteractionController::new(index, CorrelationKey::FacilityName);
        let mut view = open_view();
        let mut state = ViewState::new();

        controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        controller
            .on_facility_click(&mut view, &mut state, &facility("Unknown Clinic"))
            .await;

        assert_eq!(view.isochrone_state(), &IsochroneLayerState::Absent);
        let engine = view.engine().unwrap();
        assert!(!engine.has_layer(ISOCHRONE_FILL_LAYER));
        assert!(!engine.has_source(ISOCHRONE_SOURCE));
        // Selection still moved to the clicked facility.
        assert_eq!(state.selected_facility().unwrap().name, "Unknown Clinic");
    }

    #[tokio::test]
    async fn test_miss_when_absent_is_noop() {
        let index = loaded_index(vec![]);
        let controller = InteractionController::new(index, CorrelationKey::FacilityName);
        let mut view = open_view();
        let mut state = ViewState::new();

        let payload = controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        assert_eq!(view.isochrone_state(), &IsochroneLayerState::Absent);
        assert_eq!(payload.name, "Hospital A");
    }

    #[tokio::test]
    async fn test_click_before_index_loads_is_a_miss() {
        let index: SharedIndex = Arc::new(RwLock::new(None));
        let controller = InteractionController::new(index.clone(), CorrelationKey::FacilityName);
        let mut view = open_view();
        let mut state = ViewState::new();

        let payload = controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        assert_eq!(view.isochrone_state(), &IsochroneLayerState::Absent);
        assert_eq!(payload.name, "Hospital A");

        // Once the load task fills the slot, the same click resolves.
        *index.write().await = Some(CorrelationIndex::build(vec![feature("Hospital A", 2.1)]));
        controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        assert_eq!(
            view.isochrone_state(),
            &IsochroneLayerState::Present("Hospital A".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_id_correlation() {
        let index = loaded_index(vec![feature("H001", 2.1)]);
        let controller = InteractionController::new(index, CorrelationKey::RegisterId);
        let mut view = open_view();
        let mut state = ViewState::new();

        controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        // Polygon named by register id matches when the key is RegisterId.
        assert_eq!(
            view.isochrone_state(),
            &IsochroneLayerState::Present("Hospital A".to_string())
        );
    }

    #[tokio::test]
    async fn test_popup_payload_is_deterministic() {
        let index = loaded_index(vec![]);
        let controller = InteractionController::new(index, CorrelationKey::FacilityName);
        let mut view = open_view();
        let mut state = ViewState::new();

        let first = controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        let second = controller
            .on_facility_click(&mut view, &mut state, &facility("Hospital A"))
            .await;
        assert_eq!(first, second);
        assert!(first.impacted_population < 1000);
    }
}
