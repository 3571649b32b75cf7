//! Map view service.
//!
//! Owns the map engine seam, the two source/layer pairs (facility markers
//! plus labels, selected isochrone fill) and the click-driven isochrone
//! state machine. Everything degrades rather than faults: a missing
//! dataset renders an empty layer, a lookup miss clears the isochrone.

pub mod config;
pub mod engine;
pub mod interaction;
pub mod renderer;
pub mod state;

pub use config::{MapViewConfig, SourceConfig};
pub use engine::{HeadlessEngine, MapEngine};
pub use interaction::{InteractionController, SharedIndex};
pub use renderer::MapView;
pub use state::{IsochroneLayerState, ViewState};
