//! Common types shared across all facility-capmap crates.

pub mod error;
pub mod facility;
pub mod geo;
pub mod popup;
pub mod style;

pub use error::{CapError, CapResult};
pub use facility::Facility;
pub use geo::{Geometry, LngLat};
pub use popup::PopupPayload;
pub use style::{IsochroneStyle, OccupancyScale};
