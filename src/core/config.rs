//! Configuration for map search sessions
//!
//! Sessions are configured through presets or a custom set of options,
//! optionally loaded from JSON. The clustering thresholds and projection
//! scale are engine constants (see `core::constants`) and deliberately
//! absent here.

use crate::core::{
    constants::{DEFAULT_CENTER, DEFAULT_CLUSTER_CACHE_CAPACITY, DEFAULT_ZOOM},
    viewport::Viewport,
};
use crate::data::places::Place;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchProfile {
    Balanced,
    LowMemory,
    Custom(MapSearchOptions),
}

impl SearchProfile {
    pub fn resolve(&self) -> MapSearchOptions {
        match self {
            Self::Balanced => MapSearchOptions {
                initial_view: ViewOptions::default(),
                cluster_cache_capacity: DEFAULT_CLUSTER_CACHE_CAPACITY,
                places: Place::defaults(),
            },
            Self::LowMemory => MapSearchOptions {
                initial_view: ViewOptions::default(),
                cluster_cache_capacity: 0,
                places: Place::defaults(),
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSearchOptions {
    pub initial_view: ViewOptions,
    /// Number of memoized cluster results; 0 disables the cache
    pub cluster_cache_capacity: usize,
    /// Named places recognised by location search
    pub places: Vec<Place>,
}

impl Default for MapSearchOptions {
    fn default() -> Self {
        SearchProfile::default().resolve()
    }
}

impl MapSearchOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Rejects options that would seed a session with non-finite state
    pub fn validate(&self) -> Result<()> {
        let view = &self.initial_view;
        if !(view.latitude.is_finite() && view.longitude.is_finite()) {
            return Err(MapError::Config(format!(
                "initial view center must be finite, got ({}, {})",
                view.latitude, view.longitude
            )));
        }
        if !view.zoom.is_finite() {
            return Err(MapError::Config(format!(
                "initial zoom must be finite, got {}",
                view.zoom
            )));
        }
        if let Some(place) = self.places.iter().find(|p| !p.position().is_finite()) {
            return Err(MapError::Config(format!(
                "place '{}' has non-finite coordinates",
                place.name
            )));
        }
        Ok(())
    }
}

/// Initial viewport as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_CENTER.0,
            longitude: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl From<ViewOptions> for Viewport {
    fn from(value: ViewOptions) -> Self {
        Viewport::new(value.latitude, value.longitude, value.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_resolve() {
        let balanced = SearchProfile::Balanced.resolve();
        assert_eq!(balanced.cluster_cache_capacity, DEFAULT_CLUSTER_CACHE_CAPACITY);
        assert!(!balanced.places.is_empty());

        let low = SearchProfile::LowMemory.resolve();
        assert_eq!(low.cluster_cache_capacity, 0);

        let custom = MapSearchOptions {
            cluster_cache_capacity: 3,
            ..MapSearchOptions::default()
        };
        assert_eq!(SearchProfile::Custom(custom.clone()).resolve(), custom);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = MapSearchOptions::from_json_str(
            r#"{ "initial_view": { "latitude": 15.4909, "longitude": 73.8278 } }"#,
        )
        .unwrap();
        assert_eq!(options.initial_view.latitude, 15.4909);
        assert_eq!(options.initial_view.zoom, DEFAULT_ZOOM);
        assert_eq!(options.cluster_cache_capacity, DEFAULT_CLUSTER_CACHE_CAPACITY);
    }

    #[test]
    fn test_out_of_range_zoom_is_clamped_not_rejected() {
        let options =
            MapSearchOptions::from_json_str(r#"{ "initial_view": { "zoom": 30 } }"#).unwrap();
        let viewport = Viewport::from(options.initial_view);
        assert_eq!(viewport.zoom(), 18.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = MapSearchOptions::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, MapError::Serialization(_)));
    }

    #[test]
    fn test_places_from_json() {
        let options = MapSearchOptions::from_json_str(
            r#"{ "places": [ { "name": "Goa", "latitude": 15.2993, "longitude": 74.124 } ] }"#,
        )
        .unwrap();
        assert_eq!(options.places.len(), 1);
        assert_eq!(options.places[0].name, "Goa");
    }
}
