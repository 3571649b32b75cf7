//! Map view configuration.
//!
//! Loaded from a YAML file with defaults matching the production view over
//! Barcelona. One configuration drives one render path; the dataset
//! source, correlation key and label format are all parameters here, which
//! collapses what used to be two near-duplicate render implementations.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use capmap_common::{CapError, CapResult, IsochroneStyle, LngLat, OccupancyScale};
use ingestion::{Delimiter, TextEncoding};
use isochrone::CorrelationKey;

/// One input dataset: where it lives and how its text is encoded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// HTTP(S) URL or local file path.
    pub uri: String,
    /// Declared text encoding label ("utf-16", "utf-16be", "utf-8").
    pub encoding: String,
    /// Field delimiter label ("tab" or "comma"); ignored for GeoJSON.
    pub delimiter: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            encoding: "utf-16".to_string(),
            delimiter: "comma".to_string(),
        }
    }
}

impl SourceConfig {
    /// Resolve the declared encoding.
    pub fn text_encoding(&self) -> CapResult<TextEncoding> {
        TextEncoding::from_label(&self.encoding)
            .ok_or_else(|| CapError::InvalidConfig(format!("unknown encoding '{}'", self.encoding)))
    }

    /// Resolve the declared delimiter.
    pub fn field_delimiter(&self) -> CapResult<Delimiter> {
        Delimiter::from_label(&self.delimiter).ok_or_else(|| {
            CapError::InvalidConfig(format!("unknown delimiter '{}'", self.delimiter))
        })
    }
}

/// Wait-time label formatting for the symbol layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Suffix rendered under the value at reduced scale.
    pub suffix: String,
    /// Font scale of the value part.
    pub value_scale: f64,
    /// Font scale of the suffix part.
    pub suffix_scale: f64,
    /// Text size in points.
    pub text_size: f64,
    /// Text color.
    pub color: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            suffix: "min".to_string(),
            value_scale: 1.0,
            suffix_scale: 0.6,
            text_size: 16.0,
            color: "#ffffff".to_string(),
        }
    }
}

/// Full map view configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    /// Mount target identifier for the engine instance.
    pub container: String,
    /// Opaque reference to the externally hosted base style.
    pub style_ref: String,
    /// Initial view center as [lon, lat].
    pub center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub antialias: bool,

    /// Tabular facility dataset.
    pub facility_source: SourceConfig,
    /// Isochrone polygon dataset.
    pub isochrone_source: SourceConfig,

    /// Facility field joined against polygon names ("name" or "register_id").
    pub correlation_key: String,

    /// Circle stroke step function over occupancy.
    pub occupancy_scale: OccupancyScale,
    /// Isochrone fill/outline rule, including the highlighted facility.
    pub isochrone_style: IsochroneStyle,
    /// Wait-time label format.
    pub label: LabelConfig,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            style_ref: "mapbox://styles/rochote/cm3tyv8c5005t01si3pw64drv".to_string(),
            center: [2.190, 41.379],
            zoom: 12.0,
            pitch: 60.0,
            bearing: -17.6,
            antialias: true,
            facility_source: SourceConfig {
                uri: "./data/caps_final.csv".to_string(),
                ..SourceConfig::default()
            },
            isochrone_source: SourceConfig {
                uri: "./data/isochrones.geojson".to_string(),
                ..SourceConfig::default()
            },
            correlation_key: "name".to_string(),
            occupancy_scale: OccupancyScale::default(),
            isochrone_style: IsochroneStyle::default(),
            label: LabelConfig::default(),
        }
    }
}

impl MapViewConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> CapResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CapError::InvalidConfig(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config: MapViewConfig = serde_yaml::from_str(&text).map_err(|e| {
            CapError::InvalidConfig(format!("cannot parse '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        info!(path = %path.display(), "map view configuration loaded");
        Ok(config)
    }

    /// Check the pieces that fail late and confusingly if left bad.
    pub fn validate(&self) -> CapResult<()> {
        self.facility_source.text_encoding()?;
        self.facility_source.field_delimiter()?;
        self.isochrone_source.text_encoding()?;
        self.resolve_correlation_key()?;
        Ok(())
    }

    /// Resolve the configured correlation key field.
    pub fn resolve_correlation_key(&self) -> CapResult<CorrelationKey> {
        CorrelationKey::from_label(&self.correlation_key).ok_or_else(|| {
            CapError::InvalidConfig(format!(
                "unknown correlation key '{}'",
                self.correlation_key
            ))
        })
    }

    /// Initial view center.
    pub fn center(&self) -> LngLat {
        LngLat::new(self.center[0], self.center[1])
    }
}
