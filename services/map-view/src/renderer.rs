//! Map renderer: view lifecycle and the two source/layer pairs.
//!
//! The facility pair (circle markers + wait-time labels) appears when the
//! tabular dataset lands; the isochrone pair appears and disappears with
//! clicks. Both are upserted by source identity, because data can arrive
//! asynchronously after a prior partial load.

use serde_json::{json, Value};
use tracing::{debug, info};

use capmap_common::{CapError, CapResult, Facility};
use isochrone::{IsochroneCollection, IsochroneFeature};

use crate::config::MapViewConfig;
use crate::engine::MapEngine;
use crate::state::IsochroneLayerState;

pub const FACILITIES_SOURCE: &str = "facilities";
pub const FACILITIES_CIRCLE_LAYER: &str = "facilities-circle";
pub const FACILITIES_LABEL_LAYER: &str = "facilities-label";
pub const ISOCHRONE_SOURCE: &str = "isochrone";
pub const ISOCHRONE_FILL_LAYER: &str = "isochrone-fill";

/// An owned map view context.
///
/// The caller creates the engine instance and hands it to `open()`; there
/// is no process-wide handle. A second `open()` on a live view is a no-op,
/// `close()` tears the engine down.
pub struct MapView<E: MapEngine> {
    config: MapViewConfig,
    engine: Option<E>,
    isochrone_state: IsochroneLayerState,
}

impl<E: MapEngine> MapView<E> {
    pub fn new(config: MapViewConfig) -> Self {
        Self {
            config,
            engine: None,
            isochrone_state: IsochroneLayerState::Absent,
        }
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    /// Take ownership of an engine instance and initialize the view.
    ///
    /// Returns `true` if this call opened the view. Calling `open` on an
    /// already-open view drops the offered engine and returns `false`; the
    /// live instance stays untouched.
    pub fn open(&mut self, mut engine: E) -> bool {
        if self.engine.is_some() {
            debug!("map view already open; ignoring second open");
            return false;
        }
        engine.add_navigation_control();
        info!(
            container = %self.config.container,
            style = %self.config.style_ref,
            center = ?self.config.center,
            zoom = self.config.zoom,
            pitch = self.config.pitch,
            bearing = self.config.bearing,
            "map view opened"
        );
        self.engine = Some(engine);
        self.isochrone_state = IsochroneLayerState::Absent;
        true
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    /// Tear down the engine instance and reset layer state.
    pub fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.remove();
            info!("map view closed");
        }
        self.isochrone_state = IsochroneLayerState::Absent;
    }

    /// Engine access for the embedding (and tests).
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn isochrone_state(&self) -> &IsochroneLayerState {
        &self.isochrone_state
    }

    fn engine_mut(&mut self) -> CapResult<&mut E> {
        self.engine
            .as_mut()
            .ok_or_else(|| CapError::Engine("map view is not open".to_string()))
    }

    /// Upsert the facility source and its two layers.
    ///
    /// An existing source gets its data replaced; layers are only added
    /// when missing. Safe to call again when a late load supersedes a
    /// partial one.
    pub fn set_facilities(&mut self, facilities: &[Facility]) -> CapResult<()> {
        let data = facility_collection(facilities);
        let circle = self.circle_layer_spec();
        let label = self.label_layer_spec();

        let engine = self.engine_mut()?;
        if engine.has_source(FACILITIES_SOURCE) {
            engine.set_source_data(FACILITIES_SOURCE, data)?;
        } else {
            engine.add_source(FACILITIES_SOURCE, data)?;
        }
        if !engine.has_layer(FACILITIES_CIRCLE_LAYER) {
            engine.add_layer(circle)?;
        }
        if !engine.has_layer(FACILITIES_LABEL_LAYER) {
            engine.add_layer(label)?;
        }
        info!(count = facilities.len(), "facility layer updated");
        Ok(())
    }

    /// Show the isochrone polygon for `name`.
    ///
    /// `Absent` → create source + fill layer; `Present(_)` → replace the
    /// source data. Either way the state moves to `Present(name)`.
    pub fn show_isochrone(&mut self, name: &str, feature: &IsochroneFeature) -> CapResult<()> {
        let data = serde_json::to_value(IsochroneCollection::single(feature.clone()))?;
        let spec = self.isochrone_layer_spec();

        let engine = self.engine_mut()?;
        if engine.has_source(ISOCHRONE_SOURCE) {
            engine.set_source_data(ISOCHRONE_SOURCE, data)?;
        } else {
            engine.add_source(ISOCHRONE_SOURCE, data)?;
            engine.add_layer(spec)?;
        }
        self.isochrone_state = IsochroneLayerState::Present(name.to_string());
        debug!(facility = %name, "isochrone layer shown");
        Ok(())
    }

    /// Remove the isochrone layer and source if present.
    pub fn clear_isochrone(&mut self) -> CapResult<()> {
        if self.isochrone_state == IsochroneLayerState::Absent {
            return Ok(());
        }
        let engine = self.engine_mut()?;
        if engine.has_layer(ISOCHRONE_FILL_LAYER) {
            engine.remove_layer(ISOCHRONE_FILL_LAYER)?;
        }
        if engine.has_source(ISOCHRONE_SOURCE) {
            engine.remove_source(ISOCHRONE_SOURCE)?;
        }
        self.isochrone_state = IsochroneLayerState::Absent;
        debug!("isochrone layer cleared");
        Ok(())
    }

    /// Circle layer: stroke color steps through the occupancy scale.
    fn circle_layer_spec(&self) -> Value {
        let scale = &self.config.occupancy_scale;
        json!({
            "id": FACILITIES_CIRCLE_LAYER,
            "type": "circle",
            "source": FACILITIES_SOURCE,
            "paint": {
                "circle-radius": 16,
                "circle-color": "#7BACFC",
                "circle-stroke-color": [
                    "step",
                    ["to-number", ["coalesce", ["get", "occupancy"], 0]],
                    scale.low_color.as_str(),
                    scale.medium_threshold,
                    scale.medium_color.as_str(),
                    scale.high_threshold,
                    scale.high_color.as_str()
                ],
                "circle-stroke-width": 4
            }
        })
    }

    /// Symbol layer: wait time centered over the marker with a suffix at
    /// reduced scale.
    fn label_layer_spec(&self) -> Value {
        let label = &self.config.label;
        json!({
            "id": FACILITIES_LABEL_LAYER,
            "type": "symbol",
            "source": FACILITIES_SOURCE,
            "layout": {
                "text-field": [
                    "format",
                    ["get", "simulated_wait_time"],
                    { "font-scale": label.value_scale },
                    format!("\n{}", label.suffix),
                    { "font-scale": label.suffix_scale }
                ],
                "text-size": label.text_size,
                "text-offset": [0, 0],
                "text-anchor": "center",
                "text-justify": "center"
            },
            "paint": {
                "text-color": label.color.as_str()
            }
        })
    }

    /// Fill layer: categorical colors with one highlighted facility.
    fn isochrone_layer_spec(&self) -> Value {
        let style = &self.config.isochrone_style;
        json!({
            "id": ISOCHRONE_FILL_LAYER,
            "type": "fill",
            "source": ISOCHRONE_SOURCE,
            "paint": {
                "fill-color": [
                    "case",
                    ["==", ["get", "name"], style.highlight_name.as_str()],
                    style.highlight_fill.as_str(),
                    style.normal_fill.as_str()
                ],
                "fill-opacity": style.fill_opacity,
                "fill-outline-color": [
                    "case",
                    ["==", ["get", "name"], style.highlight_name.as_str()],
                    style.highlight_outline.as_str(),
                    style.normal_outline.as_str()
                ]
            }
        })
    }
}

/// One point feature per facility, in display order.
///
/// A NaN wait time serializes as JSON null, which the label layer renders
/// as a non-numeric label rather than dropping the marker.
fn facility_collection(facilities: &[Facility]) -> Value {
    let features: Vec<Value> = facilities
        .iter()
        .map(|f| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": f.to_position()
                },
                "properties": {
                    "name": f.name.as_str(),
                    "register_id": f.id.as_str(),
                    "index": f.display_index,
                    "simulated_wait_time": f.wait_time_minutes,
                    "is_hospital": f.is_hospital.as_str(),
                    "occupancy": f.occupancy_percent,
                    "current_occupancy": f.current_staff_count
                }
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features
    })
}
