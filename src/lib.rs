//! # Staymap
//!
//! Map search core for a vacation-rental storefront.
//!
//! Listings are grouped into grid clusters while the map is zoomed out,
//! exposed individually once the user zooms in past the clustering
//! threshold, and placed on screen with a flat degrees-to-percent
//! projection around the current viewport.

pub mod background;
pub mod core;
pub mod data;
pub mod input;
pub mod runtime;
pub mod spatial;
pub mod traits;
pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapSearchOptions, SearchProfile},
    geo::{LatLng, LatLngBounds},
    session::MapSearchSession,
    viewport::Viewport,
};

pub use data::{
    listing::{Listing, Location},
    places::{Place, PlaceDirectory},
};

pub use input::{events::MapSearchEvent, handler::ViewportChange};

pub use spatial::{
    cache::ClusterCache,
    clustering::{build_clusters, Cluster},
    grid::{cell_key, cell_size, GridCell},
    index::ListingIndex,
    projection::{place_markers, project, MarkerKind, PlacedMarker, ScreenPosition},
    visibility::{should_cluster, MarkerSet},
};

pub use traits::{ListingProvider, LocationProvider};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid listing {id}: {reason}")]
    InvalidListing { id: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

/// Failures reported by a device location provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("location services unsupported")]
    Unsupported,

    #[error("{0}")]
    Other(String),
}

/// Error type alias for convenience
pub type Error = MapError;
