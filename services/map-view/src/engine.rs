//! Map engine seam.
//!
//! The view talks to the underlying map engine through this trait using
//! style-spec JSON documents for sources and layers, the same shape the
//! engine's own API takes. The headless implementation backs tests and the
//! pipeline driver; an embedding supplies its own implementation to put
//! pixels on screen.

use std::collections::HashMap;

use serde_json::Value;

use capmap_common::{CapError, CapResult};

/// Operations the view needs from a map engine instance.
pub trait MapEngine {
    /// Add a fixed navigation control.
    fn add_navigation_control(&mut self);

    /// Add a GeoJSON source under `id`. Fails if the id is taken.
    fn add_source(&mut self, id: &str, data: Value) -> CapResult<()>;

    /// Whether a source with this id exists.
    fn has_source(&self, id: &str) -> bool;

    /// Replace the data of an existing source.
    fn set_source_data(&mut self, id: &str, data: Value) -> CapResult<()>;

    /// Add a layer from a style-spec document (must carry an `id` field).
    fn add_layer(&mut self, spec: Value) -> CapResult<()>;

    /// Whether a layer with this id exists.
    fn has_layer(&self, id: &str) -> bool;

    /// Remove a layer by id.
    fn remove_layer(&mut self, id: &str) -> CapResult<()>;

    /// Remove a source by id. Layers using it must be removed first.
    fn remove_source(&mut self, id: &str) -> CapResult<()>;

    /// Tear down the engine instance and detach listeners.
    fn remove(&mut self);
}

/// In-memory engine that records sources and layers without rendering.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    sources: HashMap<String, Value>,
    layers: Vec<(String, Value)>,
    navigation_controls: usize,
    removed: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current data of a source, if present.
    pub fn source_data(&self, id: &str) -> Option<&Value> {
        self.sources.get(id)
    }

    /// Layer ids in add order.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Full spec of a layer, if present.
    pub fn layer_spec(&self, id: &str) -> Option<&Value> {
        self.layers
            .iter()
            .find(|(layer_id, _)| layer_id == id)
            .map(|(_, spec)| spec)
    }

    pub fn navigation_controls(&self) -> usize {
        self.navigation_controls
    }

    /// Whether `remove()` has torn this instance down.
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl MapEngine for HeadlessEngine {
    fn add_navigation_control(&mut self) {
        self.navigation_controls += 1;
    }

    fn add_source(&mut self, id: &str, data: Value) -> CapResult<()> {
        if self.sources.contains_key(id) {
            return Err(CapError::Engine(format!("source '{}' already exists", id)));
        }
        self.sources.insert(id.to_string(), data);
        Ok(())
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn set_source_data(&mut self, id: &str, data: Value) -> CapResult<()> {
        match self.sources.get_mut(id) {
            Some(slot) => {
                *slot = data;
                Ok(())
            }
            None => Err(CapError::SourceNotFound(id.to_string())),
        }
    }

    fn add_layer(&mut self, spec: Value) -> CapResult<()> {
        let id = spec
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| CapError::Engine("layer spec without an id".to_string()))?
            .to_string();
        if self.has_layer(&id) {
            return Err(CapError::Engine(format!("layer '{}' already exists", id)));
        }
        self.layers.push((id, spec));
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|(layer_id, _)| layer_id == id)
    }

    fn remove_layer(&mut self, id: &str) -> CapResult<()> {
        let before = self.layers.len();
        self.layers.retain(|(layer_id, _)| layer_id != id);
        if self.layers.len() == before {
            return Err(CapError::LayerNotFound(id.to_string()));
        }
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> CapResult<()> {
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CapError::SourceNotFound(id.to_string()))
    }

    fn remove(&mut self) {
        self.sources.clear();
        self.layers.clear();
        self.removed = true;
    }
}
