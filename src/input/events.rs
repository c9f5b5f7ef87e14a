use crate::{core::geo::LatLng, LocationError};
use serde::{Deserialize, Serialize};

/// User gestures and external callbacks that move the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapSearchEvent {
    /// Drag or programmatic recenter
    Pan { center: LatLng },
    /// Zoom-in button
    ZoomIn,
    /// Zoom-out button
    ZoomOut,
    /// A location search matched a known place
    LocationSearchResolved { center: LatLng },
    /// "Use my location" found the device
    LocateSucceeded { position: LatLng },
    /// "Use my location" failed
    LocateFailed { error: LocationError },
    /// Click on a cluster marker, carrying the cluster's center
    ClusterClicked { center: LatLng },
}

impl MapSearchEvent {
    /// Gets the coordinate the event recenters on, if any
    pub fn target(&self) -> Option<LatLng> {
        match self {
            MapSearchEvent::Pan { center } => Some(*center),
            MapSearchEvent::LocationSearchResolved { center } => Some(*center),
            MapSearchEvent::LocateSucceeded { position } => Some(*position),
            MapSearchEvent::ClusterClicked { center } => Some(*center),
            MapSearchEvent::ZoomIn | MapSearchEvent::ZoomOut | MapSearchEvent::LocateFailed { .. } => {
                None
            }
        }
    }

    /// Checks if this event only changes the zoom level
    pub fn is_zoom_event(&self) -> bool {
        matches!(self, MapSearchEvent::ZoomIn | MapSearchEvent::ZoomOut)
    }
}
