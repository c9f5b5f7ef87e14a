//! Flat degrees-to-percent projection used for marker placement.
//!
//! One screen-percent unit is `PROJECTION_SCALE` degrees on both axes at
//! every zoom level, so zooming does not spread or compress markers.

use crate::core::{
    constants::{PROJECTION_SCALE, SCREEN_CENTER_PERCENT},
    geo::LatLng,
    viewport::Viewport,
};
use crate::spatial::visibility::MarkerSet;
use serde::Serialize;

/// Offset of a marker from the viewport's top-left corner, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPosition {
    pub left_percent: f64,
    pub top_percent: f64,
}

impl ScreenPosition {
    pub fn new(left_percent: f64, top_percent: f64) -> Self {
        Self {
            left_percent,
            top_percent,
        }
    }

    /// Whether the position falls inside the visible `[0, 100]` square
    pub fn is_on_screen(&self) -> bool {
        (0.0..=100.0).contains(&self.left_percent) && (0.0..=100.0).contains(&self.top_percent)
    }
}

/// Maps a coordinate to its screen position. The viewport center always
/// lands on `(50, 50)`; far-away points fall outside `[0, 100]`.
pub fn project(point: &LatLng, viewport: &Viewport) -> ScreenPosition {
    ScreenPosition {
        left_percent: (point.lng - viewport.longitude()) / PROJECTION_SCALE + SCREEN_CENTER_PERCENT,
        top_percent: SCREEN_CENTER_PERCENT - (point.lat - viewport.latitude()) / PROJECTION_SCALE,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkerKind {
    Cluster { count: usize, avg_price: f64 },
    Listing { price: f64 },
}

/// A marker ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    /// Cluster key or listing id
    pub id: String,
    pub kind: MarkerKind,
    pub position: ScreenPosition,
}

/// Projects every marker in the set: clusters by their cell center,
/// listings by their own location.
pub fn place_markers(markers: &MarkerSet, viewport: &Viewport) -> Vec<PlacedMarker> {
    match markers {
        MarkerSet::Clusters(clusters) => clusters
            .iter()
            .map(|cluster| PlacedMarker {
                id: cluster.id.clone(),
                kind: MarkerKind::Cluster {
                    count: cluster.count,
                    avg_price: cluster.avg_price,
                },
                position: project(&cluster.center, viewport),
            })
            .collect(),
        MarkerSet::Listings(listings) => listings
            .iter()
            .map(|listing| PlacedMarker {
                id: listing.id.clone(),
                kind: MarkerKind::Listing {
                    price: listing.price,
                },
                position: project(&listing.position(), viewport),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::listing::Listing;
    use crate::prelude::Arc;

    #[test]
    fn test_center_projects_to_middle() {
        for viewport in [
            Viewport::new(19.076, 72.8777, 12.0),
            Viewport::new(-33.8688, 151.2093, 8.0),
            Viewport::new(0.0, 0.0, 18.0),
        ] {
            let position = project(&viewport.center(), &viewport);
            assert_eq!(position, ScreenPosition::new(50.0, 50.0));
        }
    }

    #[test]
    fn test_north_east_goes_up_and_right() {
        let viewport = Viewport::new(10.0, 20.0, 12.0);
        let position = project(&LatLng::new(10.1, 20.2), &viewport);
        assert!((position.left_percent - 70.0).abs() < 1e-9);
        assert!((position.top_percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_ignores_zoom() {
        let point = LatLng::new(10.05, 19.97);
        let near = project(&point, &Viewport::new(10.0, 20.0, 8.0));
        let far = project(&point, &Viewport::new(10.0, 20.0, 18.0));
        assert_eq!(near, far);
    }

    #[test]
    fn test_off_screen_positions_are_returned() {
        let viewport = Viewport::new(10.0, 20.0, 12.0);
        let position = project(&LatLng::new(12.0, 20.0), &viewport);
        assert!((position.top_percent + 150.0).abs() < 1e-9);
        assert!(!position.is_on_screen());
        assert!(project(&viewport.center(), &viewport).is_on_screen());
    }

    #[test]
    fn test_place_markers_in_both_modes() {
        let listings: Arc<[Listing]> = vec![
            Listing::new("B", 19.1136, 72.8697, 3200.0),
            Listing::new("D", 19.1130, 72.8690, 4000.0),
        ]
        .into();
        let viewport = Viewport::new(19.125, 72.875, 11.0);

        let clustered = place_markers(&MarkerSet::compute(&listings, 11.0), &viewport);
        assert_eq!(clustered.len(), 1);
        assert_eq!(
            clustered[0].kind,
            MarkerKind::Cluster {
                count: 2,
                avg_price: 3600.0
            }
        );
        assert!((clustered[0].position.left_percent - 50.0).abs() < 1e-6);
        assert!((clustered[0].position.top_percent - 50.0).abs() < 1e-6);

        let individual = place_markers(&MarkerSet::compute(&listings, 16.0), &viewport);
        assert_eq!(individual.len(), 2);
        assert_eq!(individual[1].id, "D");
        assert_eq!(individual[1].kind, MarkerKind::Listing { price: 4000.0 });
    }
}
